pub mod fetch;
pub mod output;
pub mod trackingdifferences;
