#![forbid(unsafe_code)]

use super::{EventRow, ListEventsRequest, SqliteStore, StoreError};
use rusqlite::params;

impl SqliteStore {
    pub fn list_events(&self, request: ListEventsRequest) -> Result<Vec<EventRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT seq, ts_ms, entity, entity_id, type, payload_json \
             FROM events \
             WHERE seq > ?1 \
             ORDER BY seq ASC \
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(
            params![request.since_seq, request.limit as i64],
            |row| {
                Ok(EventRow {
                    seq: row.get(0)?,
                    ts_ms: row.get(1)?,
                    entity: row.get(2)?,
                    entity_id: row.get(3)?,
                    event_type: row.get(4)?,
                    payload_json: row.get(5)?,
                })
            },
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
