use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::dictionary_item::types::*;
use crate::shared::Status;
use crate::EdgeClientError;

pub fn create(
    input: &CreateDictionaryItemInput,
    client: &EdgeClient,
) -> Result<DictionaryItem, EdgeClientError> {
    client.send_json(Method::POST, &input.dictionary.path(&["item"]), input)
}

pub fn delete(dictionary: &DictionaryRef, item_key: &str, client: &EdgeClient) -> Result<(), EdgeClientError> {
    client.delete(&dictionary.path(&["item", item_key]))
}

pub fn get(
    dictionary: &DictionaryRef,
    item_key: &str,
    client: &EdgeClient,
) -> Result<DictionaryItem, EdgeClientError> {
    client.get(&dictionary.path(&["item", item_key]), &[])
}

pub fn list(dictionary: &DictionaryRef, client: &EdgeClient) -> Result<Vec<DictionaryItem>, EdgeClientError> {
    client.get(&dictionary.path(&["items"]), &[])
}

pub fn update(
    input: &UpdateDictionaryItemInput,
    client: &EdgeClient,
) -> Result<DictionaryItem, EdgeClientError> {
    client.send_json(
        Method::PUT,
        &input.dictionary.path(&["item", input.item_key.as_str()]),
        input,
    )
}

/// Applies every operation in `input.items` in a single request.
pub fn batch_modify(
    input: &BatchModifyDictionaryItemsInput,
    client: &EdgeClient,
) -> Result<(), EdgeClientError> {
    tracing::debug!(items = input.items.len(), "batch modifying dictionary items");
    let status: Status = client.send_json(Method::PATCH, &input.dictionary.path(&["items"]), input)?;
    if status.status == "ok" {
        Ok(())
    } else {
        Err(EdgeClientError::HandleResponse {
            msg: format!("unexpected batch status '{}'", status.status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::client_for;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn batch_sends_the_file_document() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/service/abc/dictionary/d1/items")
                .json_body(json!({
                    "items": [
                        { "op": "upsert", "item_key": "k", "item_value": "v" },
                        { "op": "delete", "item_key": "gone" }
                    ]
                }));
            then.status(200).json_body(json!({ "status": "ok" }));
        });
        let client = client_for(&server);
        let input = BatchModifyDictionaryItemsInput {
            dictionary: DictionaryRef::new("abc", "d1"),
            items: vec![
                BatchDictionaryItem {
                    op: BatchOperation::Upsert,
                    item_key: "k".to_string(),
                    item_value: Some("v".to_string()),
                },
                BatchDictionaryItem {
                    op: BatchOperation::Delete,
                    item_key: "gone".to_string(),
                    item_value: None,
                },
            ],
        };
        batch_modify(&input, &client).unwrap();
        mock.assert();
    }

    #[test]
    fn batch_rejects_a_non_ok_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PATCH).path("/service/abc/dictionary/d1/items");
            then.status(200).json_body(json!({ "status": "partial" }));
        });
        let client = client_for(&server);
        let input = BatchModifyDictionaryItemsInput {
            dictionary: DictionaryRef::new("abc", "d1"),
            items: vec![],
        };
        assert!(matches!(
            batch_modify(&input, &client),
            Err(EdgeClientError::HandleResponse { .. })
        ));
    }

    #[test]
    fn update_puts_the_value_under_the_key() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/service/abc/dictionary/d1/item/colour")
                .json_body(json!({ "item_value": "blue" }));
            then.status(200).json_body(json!({
                "service_id": "abc",
                "dictionary_id": "d1",
                "item_key": "colour",
                "item_value": "blue"
            }));
        });
        let client = client_for(&server);
        let input = UpdateDictionaryItemInput {
            dictionary: DictionaryRef::new("abc", "d1"),
            item_key: "colour".to_string(),
            item_value: "blue".to_string(),
        };
        let item = update(&input, &client).unwrap();
        mock.assert();
        assert_eq!(item.item_value, "blue");
    }
}
