pub mod ledger;
pub mod tracker;
pub mod translator;
pub mod validator;
