#![forbid(unsafe_code)]

use super::{
    CardDetail, CreateMemberRequest, MemberRow, SqliteStore, StoreError, insert_event_tx,
    map_link_conflict, now_ms,
};
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    pub fn create_member(&mut self, request: CreateMemberRequest) -> Result<MemberRow, StoreError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("member name must not be empty"));
        }
        let initials = request.initials.trim().to_string();
        if initials.is_empty() {
            return Err(StoreError::InvalidInput("member initials must not be empty"));
        }
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO members(name, initials, avatar_color) VALUES (?1, ?2, ?3)",
            params![name, initials, request.avatar_color],
        )?;
        let id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            now_ms,
            "member",
            id,
            "member.create",
            &json!({"name": name}).to_string(),
        )?;
        tx.commit()?;

        Ok(MemberRow {
            id,
            name,
            initials,
            avatar_color: request.avatar_color,
        })
    }

    pub fn list_members(&self) -> Result<Vec<MemberRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, initials, avatar_color FROM members ORDER BY name ASC, id ASC",
        )?;
        let rows = stmt.query_map([], member_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn assign_member(&mut self, card_id: i64, member_id: i64) -> Result<CardDetail, StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let insert = tx.execute(
            "INSERT INTO card_members(card_id, member_id) VALUES (?1, ?2)",
            params![card_id, member_id],
        );
        if let Err(err) = insert {
            return Err(map_link_conflict(err, "member already on this card"));
        }
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            card_id,
            "member.assign",
            &json!({"member_id": member_id}).to_string(),
        )?;
        tx.commit()?;

        self.card_detail(card_id)
    }

    pub fn unassign_member(
        &mut self,
        card_id: i64,
        member_id: i64,
    ) -> Result<CardDetail, StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "DELETE FROM card_members WHERE card_id = ?1 AND member_id = ?2",
            params![card_id, member_id],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            card_id,
            "member.unassign",
            &json!({"member_id": member_id}).to_string(),
        )?;
        tx.commit()?;

        self.card_detail(card_id)
    }

    pub(crate) fn members_for_card(&self, card_id: i64) -> Result<Vec<MemberRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT m.id, m.name, m.initials, m.avatar_color \
             FROM card_members cm \
             JOIN members m ON m.id = cm.member_id \
             WHERE cm.card_id = ?1 \
             ORDER BY m.name ASC, m.id ASC",
        )?;
        let rows = stmt.query_map(params![card_id], member_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn member_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemberRow> {
    Ok(MemberRow {
        id: row.get(0)?,
        name: row.get(1)?,
        initials: row.get(2)?,
        avatar_color: row.get(3)?,
    })
}
