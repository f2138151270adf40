#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct BoardRow {
    pub id: i64,
    pub title: String,
    pub background_color: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct ListRow {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    pub position: i64,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct CardRow {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date_ms: Option<i64>,
    pub position: i64,
    pub archived: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct LabelRow {
    pub id: i64,
    pub board_id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Clone, Debug)]
pub struct MemberRow {
    pub id: i64,
    pub name: String,
    pub initials: String,
    pub avatar_color: String,
}

#[derive(Clone, Debug)]
pub struct ChecklistRow {
    pub id: i64,
    pub card_id: i64,
    pub title: String,
    pub position: i64,
}

#[derive(Clone, Debug)]
pub struct ChecklistItemRow {
    pub id: i64,
    pub checklist_id: i64,
    pub text: String,
    pub completed: bool,
    pub position: i64,
}

#[derive(Clone, Debug)]
pub struct EventRow {
    pub seq: i64,
    pub ts_ms: i64,
    pub entity: Option<String>,
    pub entity_id: Option<i64>,
    pub event_type: String,
    pub payload_json: String,
}

/// A checklist with its items ordered by position.
#[derive(Clone, Debug)]
pub struct ChecklistDetail {
    pub checklist: ChecklistRow,
    pub items: Vec<ChecklistItemRow>,
}

/// A card with everything the board view renders on it.
#[derive(Clone, Debug)]
pub struct CardDetail {
    pub card: CardRow,
    pub labels: Vec<LabelRow>,
    pub members: Vec<MemberRow>,
    pub checklists: Vec<ChecklistDetail>,
}

/// A list with its non-archived cards ordered by position.
#[derive(Clone, Debug)]
pub struct ListDetail {
    pub list: ListRow,
    pub cards: Vec<CardDetail>,
}

/// The full nested read a client hydrates a board from.
#[derive(Clone, Debug)]
pub struct BoardDetail {
    pub board: BoardRow,
    pub lists: Vec<ListDetail>,
    pub labels: Vec<LabelRow>,
}

/// One search result: the card plus the list it lives in.
#[derive(Clone, Debug)]
pub struct CardSearchHit {
    pub card: CardRow,
    pub list: ListRow,
    pub labels: Vec<LabelRow>,
    pub members: Vec<MemberRow>,
}
