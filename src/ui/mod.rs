/// UI layer: top bar, filter side panel, and the dashboard body.

pub mod charts;
pub mod dashboard;
pub mod panels;
