pub mod agile;
pub mod field;
pub mod issue;
