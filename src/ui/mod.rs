pub mod countdown;
pub mod icon;
pub mod nav;
pub mod pages;
pub mod pricing;

pub use countdown::Countdown;
pub use icon::{Icon, icons};
pub use nav::SiteNav;
pub use pages::{LandingPage, NotFoundPage};
