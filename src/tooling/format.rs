//! Format catalogs, diff results and category details as text.

use crate::describe::MetadataDetail;
use crate::diff::DiffResult;
use crate::tree::{count_nodes, Container, Entity, MetadataType};
use crate::types::MetadataTree;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn checked_children<C: Container>(container: &C) -> usize {
    container
        .childs()
        .values()
        .filter(|child| child.is_checked())
        .count()
}

/// Checked Objects plus checked Items of a Type.
fn count_checked(metadata_type: &MetadataType) -> usize {
    checked_children(metadata_type)
        + metadata_type
            .childs
            .values()
            .map(checked_children)
            .sum::<usize>()
}

fn catalog_table(catalog: &MetadataTree) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Category", "Objects", "Items", "Checked", "All"]);
    for (category, metadata_type) in catalog {
        let (objects, items) = count_nodes(metadata_type);
        table.add_row(vec![
            category.clone(),
            objects.to_string(),
            items.to_string(),
            count_checked(metadata_type).to_string(),
            if metadata_type.checked { "yes" } else { "-" }.to_string(),
        ]);
    }
    table
}

/// Per-category summary of a catalog.
pub fn format_catalog_text(title: &str, catalog: &MetadataTree) -> String {
    let mut out = format!("{}\n\n", format_section_heading(title));
    if catalog.is_empty() {
        out.push_str("  (empty)\n");
        return out;
    }
    out.push_str(&format!("{}\n", catalog_table(catalog)));
    let (objects, items) = catalog.values().fold((0, 0), |(o, i), metadata_type| {
        let (objects, items) = count_nodes(metadata_type);
        (o + objects, i + items)
    });
    out.push_str(&format!(
        "\n  {} categories, {} objects, {} items\n",
        catalog.len(),
        objects,
        items
    ));
    out
}

/// Both sides of a classified diff.
pub fn format_diff_text(result: &DiffResult) -> String {
    let mut out = format_catalog_text("To deploy", &result.to_deploy);
    out.push('\n');
    out.push_str(&format_catalog_text("To delete", &result.to_delete));
    out
}

/// Table of flattened category descriptors.
pub fn format_details_text(details: &[MetadataDetail]) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Categories"));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Category", "Folder", "Suffix", "In folder", "Meta file"]);
    for detail in details {
        table.add_row(vec![
            detail.xml_name.clone(),
            detail.directory_name.clone(),
            detail.suffix.clone().unwrap_or_else(|| "-".to_string()),
            yes_no(detail.in_folder),
            yes_no(detail.meta_file),
        ]);
    }
    out.push_str(&format!("{}\n\n  {} categories\n", table, details.len()));
    out
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
