//! Static platform-type and plan-type catalogs.
//!
//! Both tables are immutable and process-wide. Lookups never fail: unknown or
//! absent keys resolve to a generic fallback.

/// Display metadata for a platform type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformType {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Display metadata and refresh rules for a plan tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanType {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub daily_refresh: bool,
    pub daily_tokens: f64,
    pub priority: u8,
}

pub const OTHER_TYPE: &str = "other";
pub const DEFAULT_TYPE_ICON: &str = "📦";

pub const PLAN_NOT_SET: &str = "Not set";
pub const DEFAULT_PLAN_COLOR: &str = "#64748b";

/// Plan assumed for platforms that carry no plan when grouping by plan.
pub const FALLBACK_PLAN: &str = "free";

pub const PLATFORM_TYPES: &[PlatformType] = &[
    PlatformType { key: "aliyun", name: "Alibaba Cloud Bailian", icon: "🔷" },
    PlatformType { key: "volcano", name: "Volcano Engine", icon: "🌋" },
    PlatformType { key: "deepseek", name: "DeepSeek", icon: "🔮" },
    PlatformType { key: "openrouter", name: "OpenRouter", icon: "🌐" },
    PlatformType { key: "openai", name: "OpenAI", icon: "🤖" },
    PlatformType { key: "anthropic", name: "Anthropic", icon: "🧠" },
    PlatformType { key: "zhipu", name: "Zhipu AI", icon: "💡" },
    PlatformType { key: "moonshot", name: "Moonshot", icon: "🌙" },
    PlatformType { key: OTHER_TYPE, name: "Other", icon: DEFAULT_TYPE_ICON },
];

pub const PLAN_TYPES: &[PlanType] = &[
    PlanType {
        key: "free",
        name: "Free",
        icon: "🆓",
        color: "#64748b",
        description: "Basic features, limited quota",
        daily_refresh: false,
        daily_tokens: 0.0,
        priority: 1,
    },
    PlanType {
        key: "basic",
        name: "Basic",
        icon: "🥉",
        color: "#10b981",
        description: "Standard features, moderate quota",
        daily_refresh: false,
        daily_tokens: 0.0,
        priority: 3,
    },
    PlanType {
        key: "pro",
        name: "Pro",
        icon: "🥈",
        color: "#3b82f6",
        description: "Advanced features, large quota",
        daily_refresh: false,
        daily_tokens: 0.0,
        priority: 4,
    },
    PlanType {
        key: "enterprise",
        name: "Enterprise",
        icon: "🥇",
        color: "#8b5cf6",
        description: "Full features, unlimited quota",
        daily_refresh: false,
        daily_tokens: 0.0,
        priority: 5,
    },
    PlanType {
        key: "custom",
        name: "Custom",
        icon: "⚡",
        color: "#f59e0b",
        description: "Custom configuration",
        daily_refresh: false,
        daily_tokens: 0.0,
        priority: 2,
    },
    PlanType {
        key: "volcano_collab",
        name: "Volcano Collaboration Plan",
        icon: "🔥",
        color: "#ff6b35",
        description: "2,000,000 tokens refreshed every day",
        daily_refresh: true,
        daily_tokens: 2_000_000.0,
        priority: 6,
    },
];

// -- Platform types -------------------------------------------------------

pub fn platform_type(key: &str) -> Option<&'static PlatformType> {
    PLATFORM_TYPES.iter().find(|t| t.key == key)
}

/// Display name for a platform type, or the raw key when uncatalogued.
pub fn type_name(key: &str) -> &str {
    platform_type(key).map(|t| t.name).unwrap_or(key)
}

pub fn type_icon(key: &str) -> &'static str {
    platform_type(key).map(|t| t.icon).unwrap_or(DEFAULT_TYPE_ICON)
}

// -- Plan types -----------------------------------------------------------

pub fn plan_type(key: Option<&str>) -> Option<&'static PlanType> {
    let key = key?;
    PLAN_TYPES.iter().find(|p| p.key == key)
}

pub fn plan_name(key: Option<&str>) -> &'static str {
    plan_type(key).map(|p| p.name).unwrap_or(PLAN_NOT_SET)
}

pub fn plan_icon(key: Option<&str>) -> &'static str {
    plan_type(key).map(|p| p.icon).unwrap_or("")
}

pub fn plan_color(key: Option<&str>) -> &'static str {
    plan_type(key).map(|p| p.color).unwrap_or(DEFAULT_PLAN_COLOR)
}

pub fn plan_description(key: Option<&str>) -> &'static str {
    plan_type(key).map(|p| p.description).unwrap_or("")
}

/// Sort rank of a plan; higher is more important, unknown/absent is 0.
pub fn plan_priority(key: Option<&str>) -> u8 {
    plan_type(key).map(|p| p.priority).unwrap_or(0)
}

pub fn is_daily_refresh_plan(key: Option<&str>) -> bool {
    plan_type(key).is_some_and(|p| p.daily_refresh)
}

/// Fixed daily quota of a daily-refresh plan; 0 for every other plan.
pub fn daily_tokens(key: Option<&str>) -> f64 {
    plan_type(key).map(|p| p.daily_tokens).unwrap_or(0.0)
}
