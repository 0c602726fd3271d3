//! Error-code catalogue.

use super::Severity;

pub const ADD_ROW_DEFINITIONS: &str = "RXT101";
pub const ADD_COLUMN_DEFINITIONS: &str = "RXT102";
pub const ADD_ROW_AND_COLUMN_DEFINITIONS: &str = "RXT103";
pub const MISSING_ROW_DEFINITION: &str = "RXT104";
pub const MISSING_COLUMN_DEFINITION: &str = "RXT105";
pub const SELECTED_ITEM_NOT_TWO_WAY: &str = "RXT160";
pub const HARDCODED_STRING: &str = "RXT200";
pub const ROW_SPAN_OVERFLOW: &str = "RXT201";
pub const COLUMN_SPAN_OVERFLOW: &str = "RXT202";
pub const TEXT_BOX_WITHOUT_INPUT_SCOPE: &str = "RXT300";
pub const ENTRY_WITHOUT_KEYBOARD: &str = "RXT301";
pub const CHECK_BOX_UNPAIRED_EVENT: &str = "RXT401";
pub const USE_MEDIA_PLAYER_ELEMENT: &str = "RXT402";
pub const IMAGE_WITHOUT_NAME: &str = "RXT451";

pub const ALL: &[&str] = &[
    ADD_ROW_DEFINITIONS,
    ADD_COLUMN_DEFINITIONS,
    ADD_ROW_AND_COLUMN_DEFINITIONS,
    MISSING_ROW_DEFINITION,
    MISSING_COLUMN_DEFINITION,
    SELECTED_ITEM_NOT_TWO_WAY,
    HARDCODED_STRING,
    ROW_SPAN_OVERFLOW,
    COLUMN_SPAN_OVERFLOW,
    TEXT_BOX_WITHOUT_INPUT_SCOPE,
    ENTRY_WITHOUT_KEYBOARD,
    CHECK_BOX_UNPAIRED_EVENT,
    USE_MEDIA_PLAYER_ELEMENT,
    IMAGE_WITHOUT_NAME,
];

/// Severity a tag with `code` gets unless configuration overrides it.
pub fn default_severity(code: &str) -> Severity {
    match code {
        MISSING_ROW_DEFINITION
        | MISSING_COLUMN_DEFINITION
        | ROW_SPAN_OVERFLOW
        | COLUMN_SPAN_OVERFLOW
        | SELECTED_ITEM_NOT_TWO_WAY
        | CHECK_BOX_UNPAIRED_EVENT
        | IMAGE_WITHOUT_NAME => Severity::Warning,
        ADD_ROW_DEFINITIONS | ADD_COLUMN_DEFINITIONS | ADD_ROW_AND_COLUMN_DEFINITIONS => {
            Severity::Hidden
        }
        _ => Severity::Suggestion,
    }
}
