// Library root
// -----------
// The binary (`main.rs`) wires these modules into an interactive CLI for
// listing an item for sale.
//
// Module responsibilities:
// - `config`: the API base URL, built once and passed around explicitly.
// - `draft`: the in-memory listing record and the tagged edits on it.
// - `listing`: the form component: draft holder, change handlers and
//   the submit handler that posts the draft.
// - `api`: HTTP interactions with the backend (create item, list items).
// - `ui`: terminal flows that enforce the input constraints and drive
//   the form component.
pub mod api;
pub mod config;
pub mod draft;
pub mod listing;
pub mod ui;
