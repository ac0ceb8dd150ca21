//! # Participant Store
//!
//! Loads the participants of an exchange round from record files on disk.
//! The matching engine itself never reads files; everything it sees has
//! already been normalized here.
//!
//! ## Record format
//!
//! JSON files hold an array of records or an object with a `participants`
//! array; TOML files use `[[participants]]` tables.
//!
//! ```json
//! [
//!   {
//!     "agency_id": "north",
//!     "name": "North Agency",
//!     "uploads": [
//!       { "offers": [{ "MODELO": "Corolla", "VERSION": "XEi" }],
//!         "wants": ["CIVIC - EXL"] }
//!     ]
//!   }
//! ]
//! ```
//!
//! An item is either a bare label or an object with `full_name`, or with
//! `model`/`version` (also accepted as `MODELO`/`VERSION`), which become
//! `"MODEL - VERSION"`. Entries without a usable identifier are dropped and
//! counted.

mod loader;
mod records;

pub use loader::{LoadedParticipants, RecordDiscovery, RecordFile, load_participants, read_record_file};
pub use records::{
    ItemRecord, NormalizedRecord, ParticipantRecord, RecordDocument, RecordId, UploadRecord,
    parse_json, parse_toml,
};
