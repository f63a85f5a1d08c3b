pub mod item_filter;
pub mod library;
pub mod practice_item;
pub mod practice_repository;
pub mod recording;
pub mod score_record;
pub mod topic;
