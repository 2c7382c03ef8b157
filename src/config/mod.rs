//! Configuration module

mod site;

pub use site::FooterConfig;
pub use site::HeadTag;
pub use site::NavItem;
pub use site::PostsConfig;
pub use site::SearchConfig;
pub use site::SearchProvider;
pub use site::SidebarGroup;
pub use site::SidebarItem;
pub use site::SidebarSection;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::SocialLink;
pub use site::ThemeConfig;
