//! Category display formatting

use crate::models::Category;

use super::format::truncate_text;

/// Format a list of categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(8, 24);

    let mut output = String::new();
    output.push_str(&format!(
        "{:2}  {:<width$}  {:<30}  {}\n",
        "",
        "Category",
        "Description",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:2}  {:-<width$}  {:-<30}  {:-<36}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:2}  {:<width$}  {:<30}  {}\n",
            category.icon,
            truncate_text(&category.name, name_width),
            truncate_text(&category.description, 30),
            category.id,
            width = name_width
        ));
    }

    output
}

/// Format category details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    if category.icon.is_empty() {
        output.push_str(&format!("Category: {}\n", category.name));
    } else {
        output.push_str(&format!("Category: {} {}\n", category.icon, category.name));
    }
    output.push_str(&format!("  ID:          {}\n", category.id));

    if !category.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", category.description));
    }
    if !category.color.is_empty() {
        output.push_str(&format!("  Color:       {}\n", category.color));
    }
    if let Some(created) = category.created_at {
        output.push_str(&format!(
            "  Created:     {}\n",
            created.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if let Some(updated) = category.updated_at {
        output.push_str(&format!(
            "  Modified:    {}\n",
            updated.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}
