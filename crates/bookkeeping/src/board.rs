//! Project board field and column lookup.
//!
//! A "column" on a Projects (v2) board is an option of a single-select field,
//! usually the one named `Status`. Names are matched case-insensitively with
//! surrounding whitespace ignored, since board owners rename columns freely.

use crate::{BookkeepingError, FieldId, FieldOption, OptionId, Project, ProjectField};

/// The field and option IDs needed to place an item in a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTarget {
    pub field_id: FieldId,
    pub option_id: OptionId,
}

fn names_match(candidate: &str, wanted: &str) -> bool {
    candidate.trim().eq_ignore_ascii_case(wanted.trim())
}

/// Finds a field by name.
pub fn find_field<'a>(fields: &'a [ProjectField], name: &str) -> Option<&'a ProjectField> {
    fields.iter().find(|field| names_match(&field.name, name))
}

/// Finds an option (column) of a single-select field by name.
pub fn find_option<'a>(field: &'a ProjectField, name: &str) -> Option<&'a FieldOption> {
    field.options.iter().find(|option| names_match(&option.name, name))
}

/// Resolves `field_name` / `column_name` on a project to the IDs needed by
/// the item update mutation.
pub fn resolve_column(
    project: &Project,
    field_name: &str,
    column_name: &str,
) -> Result<ColumnTarget, BookkeepingError> {
    let field = find_field(&project.fields, field_name).ok_or_else(|| {
        BookkeepingError::UnknownField {
            field: field_name.to_string(),
            available: project.fields.iter().map(|f| f.name.clone()).collect(),
        }
    })?;

    if !field.is_single_select() {
        return Err(BookkeepingError::NotSingleSelect {
            field: field.name.clone(),
        });
    }

    let option = find_option(field, column_name).ok_or_else(|| BookkeepingError::UnknownColumn {
        field: field.name.clone(),
        column: column_name.to_string(),
        available: field.options.iter().map(|o| o.name.clone()).collect(),
    })?;

    Ok(ColumnTarget {
        field_id: field.id.clone(),
        option_id: option.id.clone(),
    })
}
