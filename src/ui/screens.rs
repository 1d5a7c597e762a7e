pub(crate) mod charts;
pub(crate) mod events;
pub(crate) mod monthly;
pub(crate) mod plan;
pub(crate) mod yearly;
