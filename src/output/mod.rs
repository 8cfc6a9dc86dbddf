// Output formatting — terminal display of scores and reports.

pub mod terminal;
