//! Integration tests for the metadata catalog builders

mod cli_contracts;
mod describe_details;
mod diff_classification;
mod directory_scan;
mod manifest_import;
mod serialization;
mod support;
