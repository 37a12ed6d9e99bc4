pub(crate) mod chart;
pub(crate) mod home;
pub(crate) mod series;
