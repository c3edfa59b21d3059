use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::config_store_item::types::*;
use crate::EdgeClientError;

fn path<'a>(store_id: &'a str, rest: &[&'a str]) -> Vec<&'a str> {
    let mut segments = vec!["resources", "stores", "config", store_id];
    segments.extend_from_slice(rest);
    segments
}

pub fn create(
    input: &CreateConfigStoreItemInput,
    client: &EdgeClient,
) -> Result<ConfigStoreItem, EdgeClientError> {
    client.send_json(Method::POST, &path(&input.store_id, &["item"]), input)
}

pub fn delete(store_id: &str, key: &str, client: &EdgeClient) -> Result<(), EdgeClientError> {
    client.delete(&path(store_id, &["item", key]))
}

pub fn get(store_id: &str, key: &str, client: &EdgeClient) -> Result<ConfigStoreItem, EdgeClientError> {
    client.get(&path(store_id, &["item", key]), &[])
}

pub fn list(store_id: &str, client: &EdgeClient) -> Result<Vec<ConfigStoreItem>, EdgeClientError> {
    client.get(&path(store_id, &["items"]), &[])
}

pub fn update(
    input: &UpdateConfigStoreItemInput,
    client: &EdgeClient,
) -> Result<ConfigStoreItem, EdgeClientError> {
    let method = if input.upsert { Method::PUT } else { Method::PATCH };
    client.send_json(method, &path(&input.store_id, &["item", input.key.as_str()]), input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::client_for;
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::patch(false, PATCH)]
    #[case::upsert(true, PUT)]
    fn update_method_follows_upsert(#[case] upsert: bool, #[case] method: httpmock::Method) {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(method)
                .path("/resources/stores/config/s1/item/feature")
                .json_body(json!({ "item_value": "on" }));
            then.status(200).json_body(json!({
                "store_id": "s1",
                "item_key": "feature",
                "item_value": "on"
            }));
        });
        let client = client_for(&server);
        let input = UpdateConfigStoreItemInput {
            store_id: "s1".to_string(),
            key: "feature".to_string(),
            upsert,
            value: "on".to_string(),
        };
        let item = update(&input, &client).unwrap();
        mock.assert();
        assert_eq!(item.value, "on");
    }

    #[test]
    fn list_reads_every_item() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/resources/stores/config/s1/items");
            then.status(200).json_body(json!([
                { "store_id": "s1", "item_key": "a", "item_value": "1" },
                { "store_id": "s1", "item_key": "b", "item_value": "2" }
            ]));
        });
        let client = client_for(&server);
        let items = list("s1", &client).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, "a");
    }
}
