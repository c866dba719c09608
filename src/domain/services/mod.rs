mod entitlement_checker;
mod link_classifier;

pub use entitlement_checker::EntitlementChecker;
pub use link_classifier::LinkClassifier;
