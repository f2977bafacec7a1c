//! Output pipeline: turn a JSON:API envelope into what the user sees.
//!
//! The pipeline runs in a fixed order: the mode is resolved from flags and terminal
//! context, the raw envelope is normalized into flat resources, shortcut options
//! (`--pluck`, `--count`, `--only-ids`) are applied, fields are selected, and the
//! renderer for the active mode produces the final string. `json-raw` skips every
//! step after mode resolution and prints the envelope as received.

mod fields;
mod mode;
mod normalize;
mod render;
mod router;

pub use fields::{extract_ids, plain_value, pluck_field, select_fields, FlatResource};
pub use mode::{resolve_output_mode, OutputMode, OutputOptions};
pub use normalize::{flatten_list_response, flatten_meta, flatten_resource, FlatList, PageInfo};
pub use render::{column_widths, title_case, Column};
pub use router::{output_error, output_list, output_record, output_resource};
