pub mod auto_run;
pub mod dashboard;
pub mod generate;
pub mod migration;
pub mod setup;
pub mod test;
