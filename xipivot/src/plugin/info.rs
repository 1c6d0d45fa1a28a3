//! Plugin identity reported to the host.

/// Identity metadata exposed to the plugin loader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub version: f64,
}

/// XIPivot's identity.
pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "XIPivot",
    author: "Heals",
    description: "Runtime DAT / music replacement manager",
    link: "https://github.com/shirk/XIPivot",
    version: 4.01,
};
