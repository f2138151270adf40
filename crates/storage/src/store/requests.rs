#![forbid(unsafe_code)]

use kb_core::position::OrderEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateBoardRequest {
    pub title: String,
    pub background_color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateListRequest {
    pub board_id: i64,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReorderListsRequest {
    pub entries: Vec<OrderEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateCardRequest {
    pub list_id: i64,
    pub title: String,
}

/// Partial card update. The outer `Option` means "leave untouched"; the inner
/// one clears the column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCardRequest {
    pub card_id: i64,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date_ms: Option<Option<i64>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCardsRequest {
    pub text: String,
    pub board_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateLabelRequest {
    pub board_id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateMemberRequest {
    pub name: String,
    pub initials: String,
    pub avatar_color: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateChecklistRequest {
    pub card_id: i64,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddChecklistItemRequest {
    pub checklist_id: i64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEventsRequest {
    pub since_seq: i64,
    pub limit: usize,
}
