use std::io::Write;

use clap::Parser;
use edgectl_client::operations::logging::{LoggingKind, LoggingSettings};
use serde::Serialize;

use super::common::{set, CommonFlags, FileFlags, ProviderArgs};
use crate::command::output::or_empty;
use crate::EdgeResult;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct S3 {
    /// Your S3 bucket name
    #[arg(long = "bucket")]
    bucket: Option<String>,
    /// Your S3 account access key
    #[arg(long = "access-key", requires = "secret_key", conflicts_with = "iam_role")]
    access_key: Option<String>,
    /// Your S3 account secret key
    #[arg(long = "secret-key", requires = "access_key", conflicts_with = "iam_role")]
    secret_key: Option<String>,
    /// The IAM role ARN for logging
    #[arg(long = "iam-role")]
    iam_role: Option<String>,
    /// The domain of the S3 endpoint
    #[arg(long = "domain")]
    domain: Option<String>,
    /// The S3 redundancy level
    #[arg(long = "redundancy")]
    redundancy: Option<String>,
    /// Set to enable S3 Server Side Encryption. Can be either AES256 or aws:kms
    #[arg(long = "server-side-encryption")]
    server_side_encryption: Option<String>,
    /// Server-side KMS Key ID. Must be set if server-side-encryption is set to aws:kms
    #[arg(long = "server-side-encryption-kms-key-id")]
    server_side_encryption_kms_key_id: Option<String>,
    /// The access control list (ACL) specific request header
    #[arg(long = "acl")]
    acl: Option<String>,
    /// The maximum size of a log file in bytes
    #[arg(long = "file-max-bytes")]
    file_max_bytes: Option<u64>,
    #[clap(flatten)]
    common: CommonFlags,
    #[clap(flatten)]
    file: FileFlags,
}

impl ProviderArgs for S3 {
    const KIND: LoggingKind = LoggingKind::S3;

    /// Either a key pair or an IAM role authenticates the endpoint.
    fn required(&self) -> Vec<(&'static str, bool)> {
        let key_pair = self.access_key.is_some() && self.secret_key.is_some();
        vec![
            ("--bucket", self.bucket.is_some()),
            ("--access-key and --secret-key, or --iam-role", key_pair || self.iam_role.is_some()),
        ]
    }

    fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.bucket_name, &self.bucket);
        set(&mut settings.access_key, &self.access_key);
        set(&mut settings.secret_key, &self.secret_key);
        set(&mut settings.iam_role, &self.iam_role);
        set(&mut settings.domain, &self.domain);
        set(&mut settings.redundancy, &self.redundancy);
        set(&mut settings.server_side_encryption, &self.server_side_encryption);
        set(
            &mut settings.server_side_encryption_kms_key_id,
            &self.server_side_encryption_kms_key_id,
        );
        set(&mut settings.acl, &self.acl);
        set(&mut settings.file_max_bytes, &self.file_max_bytes);
        self.common.apply(settings);
        self.file.apply(settings);
    }

    fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}Bucket: {}", or_empty(&settings.bucket_name))?;
        writeln!(out, "{indent}Access key: {}", or_empty(&settings.access_key))?;
        writeln!(out, "{indent}Secret key: {}", or_empty(&settings.secret_key))?;
        writeln!(out, "{indent}IAM role: {}", or_empty(&settings.iam_role))?;
        writeln!(out, "{indent}Domain: {}", or_empty(&settings.domain))?;
        writeln!(out, "{indent}Redundancy: {}", or_empty(&settings.redundancy))?;
        writeln!(out, "{indent}Server-side encryption: {}", or_empty(&settings.server_side_encryption))?;
        writeln!(
            out,
            "{indent}Server-side encryption KMS key ID: {}",
            or_empty(&settings.server_side_encryption_kms_key_id)
        )?;
        writeln!(out, "{indent}ACL: {}", or_empty(&settings.acl))?;
        writeln!(out, "{indent}File max bytes: {}", or_empty(&settings.file_max_bytes))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::*;

    fn parse(args: &[&str]) -> Result<S3, clap::Error> {
        let mut argv = vec!["s3"];
        argv.extend_from_slice(args);
        S3::try_parse_from(argv)
    }

    #[rstest]
    #[case::key_pair(&["--bucket", "b", "--access-key", "a", "--secret-key", "s"], true)]
    #[case::iam_role(&["--bucket", "b", "--iam-role", "arn"], true)]
    #[case::no_credentials(&["--bucket", "b"], false)]
    #[case::no_bucket(&["--iam-role", "arn"], false)]
    fn it_needs_a_bucket_and_credentials(#[case] args: &[&str], #[case] complete: bool) {
        let s3 = parse(args).unwrap();
        let all_given = s3.required().iter().all(|(_, given)| *given);
        assert_that!(all_given).is_equal_to(complete);
    }

    #[test]
    fn half_a_key_pair_is_rejected_by_the_parser() {
        assert_that!(parse(&["--bucket", "b", "--access-key", "a"]).is_err()).is_true();
    }

    #[test]
    fn key_pair_and_role_conflict() {
        let result = parse(&["--access-key", "a", "--secret-key", "s", "--iam-role", "arn"]);
        assert_that!(result.is_err()).is_true();
    }

    #[test]
    fn gzip_and_codec_conflict() {
        let result = parse(&["--gzip-level", "3", "--compression-codec", "zstd"]);
        assert_that!(result.is_err()).is_true();
    }
}
