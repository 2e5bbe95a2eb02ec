pub use stockwise_models::permissions::{
    AccessResponse, ActionAccess, SectionAccess, SubmoduleAccess,
};
