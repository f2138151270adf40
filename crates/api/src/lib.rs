#![forbid(unsafe_code)]

mod handlers;
mod support;

use kb_storage::{SqliteStore, StoreError};
use serde_json::{Map, Value};
use std::path::Path;

use support::ai::ai_error;

/// Command front for a kanban store. Transport is someone else's problem:
/// callers hand over a command name and a JSON args object, and get the
/// response envelope back as a JSON value.
pub struct ApiServer {
    store: SqliteStore,
}

impl ApiServer {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            store: SqliteStore::open(storage_dir)?,
        })
    }

    pub fn dispatch(&mut self, cmd: &str, args: Value) -> Value {
        let args: Map<String, Value> = match args {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => return ai_error("INVALID_INPUT", "args must be an object"),
        };

        match cmd {
            "boards.create" => handlers::boards::create(self, &args),
            "boards.list" => handlers::boards::list(self, &args),
            "boards.detail" => handlers::boards::detail(self, &args),
            "lists.create" => handlers::lists::create(self, &args),
            "lists.rename" => handlers::lists::rename(self, &args),
            "lists.delete" => handlers::lists::delete(self, &args),
            "lists.reorder" => handlers::lists::reorder(self, &args),
            "cards.create" => handlers::cards::create(self, &args),
            "cards.update" => handlers::cards::update(self, &args),
            "cards.move" => handlers::cards::move_card(self, &args),
            "cards.archive" => handlers::cards::archive(self, &args),
            "cards.delete" => handlers::cards::delete(self, &args),
            "cards.search" => handlers::cards::search(self, &args),
            "labels.create" => handlers::labels::create(self, &args),
            "labels.list" => handlers::labels::list(self, &args),
            "labels.attach" => handlers::labels::attach(self, &args),
            "labels.detach" => handlers::labels::detach(self, &args),
            "members.create" => handlers::members::create(self, &args),
            "members.list" => handlers::members::list(self, &args),
            "members.assign" => handlers::members::assign(self, &args),
            "members.unassign" => handlers::members::unassign(self, &args),
            "checklists.create" => handlers::checklists::create(self, &args),
            "checklists.delete" => handlers::checklists::delete(self, &args),
            "checklists.add_item" => handlers::checklists::add_item(self, &args),
            "checklists.set_item" => handlers::checklists::set_item(self, &args),
            "checklists.delete_item" => handlers::checklists::delete_item(self, &args),
            "events.list" => handlers::events::list(self, &args),
            _ => ai_error("UNKNOWN_COMMAND", &format!("unknown command: {cmd}")),
        }
    }
}

/// Envelope for a request the front could not even dispatch (bad framing,
/// unparseable JSON). Lives here so the binary shares the error shape.
pub fn protocol_error(message: &str) -> Value {
    ai_error("INVALID_REQUEST", message)
}
