//! Core domain model, price rounding and pre-flight validation for Offerly.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const MAX_PAGES: i64 = 100;
pub const MAX_PRODUCTS: i64 = 10_000;

/// Closed set of string-backed input values.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    LandingPage,
    WordpressWebsite,
    WoocommerceStore,
    UiFixes,
    ApiIntegration,
    Maintenance,
    SeoBasic,
}

impl ServiceType {
    /// Services priced partly by page count.
    pub fn is_website(self) -> bool {
        matches!(
            self,
            Self::LandingPage | Self::WordpressWebsite | Self::WoocommerceStore
        )
    }

    pub fn is_store(self) -> bool {
        self == Self::WoocommerceStore
    }

    /// Services where an unset page count deserves a follow-up question.
    pub fn asks_for_page_count(self) -> bool {
        matches!(self, Self::WordpressWebsite | Self::WoocommerceStore)
    }
}

impl Choice for ServiceType {
    const ALL: &'static [Self] = &[
        Self::LandingPage,
        Self::WordpressWebsite,
        Self::WoocommerceStore,
        Self::UiFixes,
        Self::ApiIntegration,
        Self::Maintenance,
        Self::SeoBasic,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::LandingPage => "landing_page",
            Self::WordpressWebsite => "wordpress_website",
            Self::WoocommerceStore => "woocommerce_store",
            Self::UiFixes => "ui_fixes",
            Self::ApiIntegration => "api_integration",
            Self::Maintenance => "maintenance",
            Self::SeoBasic => "seo_basic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Fixed,
    Hourly,
}

impl Choice for PricingModel {
    const ALL: &'static [Self] = &[Self::Fixed, Self::Hourly];

    fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Hourly => "hourly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn label_en(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            Self::Low => "منخفض",
            Self::Medium => "متوسط",
            Self::High => "عالي",
        }
    }
}

impl Choice for Complexity {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Arabic,
    English,
    Both,
}

impl Language {
    pub fn label_en(self) -> &'static str {
        match self {
            Self::Arabic => "Arabic",
            Self::English => "English",
            Self::Both => "Both",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            Self::Arabic => "العربية",
            Self::English => "الإنجليزية",
            Self::Both => "كلاهما",
        }
    }
}

impl Choice for Language {
    const ALL: &'static [Self] = &[Self::Arabic, Self::English, Self::Both];

    fn as_str(self) -> &'static str {
        match self {
            Self::Arabic => "arabic",
            Self::English => "english",
            Self::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentReadiness {
    Ready,
    NeedsCopywriting,
}

impl ContentReadiness {
    pub fn label_en(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::NeedsCopywriting => "Needs Copywriting",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            Self::Ready => "جاهز",
            Self::NeedsCopywriting => "يحتاج كتابة",
        }
    }
}

impl Choice for ContentReadiness {
    const ALL: &'static [Self] = &[Self::Ready, Self::NeedsCopywriting];

    fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::NeedsCopywriting => "needs_copywriting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignType {
    Template,
    Custom,
}

impl DesignType {
    pub fn label_en(self) -> &'static str {
        match self {
            Self::Template => "Template",
            Self::Custom => "Custom",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            Self::Template => "قالب",
            Self::Custom => "مخصص",
        }
    }
}

impl Choice for DesignType {
    const ALL: &'static [Self] = &[Self::Template, Self::Custom];

    fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Rush,
    Extreme,
}

impl Urgency {
    pub fn label_en(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Rush => "Rush <7 days",
            Self::Extreme => "Extreme <3 days",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            Self::Normal => "عادي",
            Self::Rush => "مستعجل <7 أيام",
            Self::Extreme => "طارئ <3 أيام",
        }
    }
}

impl Choice for Urgency {
    const ALL: &'static [Self] = &[Self::Normal, Self::Rush, Self::Extreme];

    fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rush => "rush",
            Self::Extreme => "extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Addon {
    PaymentGateway,
    ShippingIntegration,
    UserAccounts,
    AdminDashboard,
    ApiSync,
    BlogSetup,
    PerformanceOptimization,
    SeoSetup,
}

impl Choice for Addon {
    const ALL: &'static [Self] = &[
        Self::PaymentGateway,
        Self::ShippingIntegration,
        Self::UserAccounts,
        Self::AdminDashboard,
        Self::ApiSync,
        Self::BlogSetup,
        Self::PerformanceOptimization,
        Self::SeoSetup,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::PaymentGateway => "payment_gateway",
            Self::ShippingIntegration => "shipping_integration",
            Self::UserAccounts => "user_accounts",
            Self::AdminDashboard => "admin_dashboard",
            Self::ApiSync => "api_sync",
            Self::BlogSetup => "blog_setup",
            Self::PerformanceOptimization => "performance_optimization",
            Self::SeoSetup => "seo_setup",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(
    ServiceType,
    PricingModel,
    Complexity,
    Language,
    ContentReadiness,
    DesignType,
    Urgency,
    Addon,
);

/// The five multiplier categories, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierCategory {
    Complexity,
    Language,
    Content,
    Design,
    Urgency,
}

impl MultiplierCategory {
    pub const ORDERED: [Self; 5] = [
        Self::Complexity,
        Self::Language,
        Self::Content,
        Self::Design,
        Self::Urgency,
    ];

    pub fn label_en(self) -> &'static str {
        match self {
            Self::Complexity => "Complexity",
            Self::Language => "Languages",
            Self::Content => "Content",
            Self::Design => "Design",
            Self::Urgency => "Urgency",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            Self::Complexity => "التعقيد",
            Self::Language => "اللغات",
            Self::Content => "المحتوى",
            Self::Design => "التصميم",
            Self::Urgency => "الاستعجال",
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Fully-typed project description consumed by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpecification {
    pub service_type: ServiceType,
    pub pricing_model: PricingModel,
    pub complexity: Complexity,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub products: u32,
    pub languages: Language,
    #[serde(default)]
    pub addons: Vec<Addon>,
    pub content_ready: ContentReadiness,
    pub design: DesignType,
    pub urgency: Urgency,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoints: Option<u32>,
}

impl ProjectSpecification {
    /// A specification with every multiplier at its neutral variant.
    pub fn baseline(service_type: ServiceType) -> Self {
        Self {
            service_type,
            pricing_model: PricingModel::Fixed,
            complexity: Complexity::Low,
            pages: 0,
            products: 0,
            languages: Language::Arabic,
            addons: Vec::new(),
            content_ready: ContentReadiness::Ready,
            design: DesignType::Template,
            urgency: Urgency::Normal,
            currency: default_currency(),
            api_endpoints: None,
        }
    }

    pub fn has_addon(&self, addon: Addon) -> bool {
        self.addons.contains(&addon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub hourly_rate: f64,
    pub minimum_project_price: f64,
    pub enable_complexity_multiplier: bool,
    pub enable_language_multiplier: bool,
    pub enable_content_multiplier: bool,
    pub enable_design_multiplier: bool,
    pub enable_urgency_multiplier: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            hourly_rate: 15.0,
            minimum_project_price: 100.0,
            enable_complexity_multiplier: true,
            enable_language_multiplier: true,
            enable_content_multiplier: true,
            enable_design_multiplier: true,
            enable_urgency_multiplier: true,
        }
    }
}

impl UserSettings {
    pub fn multiplier_enabled(&self, category: MultiplierCategory) -> bool {
        match category {
            MultiplierCategory::Complexity => self.enable_complexity_multiplier,
            MultiplierCategory::Language => self.enable_language_multiplier,
            MultiplierCategory::Content => self.enable_content_multiplier,
            MultiplierCategory::Design => self.enable_design_multiplier,
            MultiplierCategory::Urgency => self.enable_urgency_multiplier,
        }
    }
}

/// Partial settings as supplied by a caller; unset fields fall back to a base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_project_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_complexity_multiplier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_language_multiplier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_content_multiplier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_design_multiplier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_urgency_multiplier: Option<bool>,
}

impl SettingsOverrides {
    pub fn resolve(&self) -> UserSettings {
        self.apply_to(&UserSettings::default())
    }

    pub fn apply_to(&self, base: &UserSettings) -> UserSettings {
        UserSettings {
            hourly_rate: self.hourly_rate.unwrap_or(base.hourly_rate),
            minimum_project_price: self
                .minimum_project_price
                .unwrap_or(base.minimum_project_price),
            enable_complexity_multiplier: self
                .enable_complexity_multiplier
                .unwrap_or(base.enable_complexity_multiplier),
            enable_language_multiplier: self
                .enable_language_multiplier
                .unwrap_or(base.enable_language_multiplier),
            enable_content_multiplier: self
                .enable_content_multiplier
                .unwrap_or(base.enable_content_multiplier),
            enable_design_multiplier: self
                .enable_design_multiplier
                .unwrap_or(base.enable_design_multiplier),
            enable_urgency_multiplier: self
                .enable_urgency_multiplier
                .unwrap_or(base.enable_urgency_multiplier),
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(&self, other: &SettingsOverrides) -> SettingsOverrides {
        SettingsOverrides {
            hourly_rate: other.hourly_rate.or(self.hourly_rate),
            minimum_project_price: other.minimum_project_price.or(self.minimum_project_price),
            enable_complexity_multiplier: other
                .enable_complexity_multiplier
                .or(self.enable_complexity_multiplier),
            enable_language_multiplier: other
                .enable_language_multiplier
                .or(self.enable_language_multiplier),
            enable_content_multiplier: other
                .enable_content_multiplier
                .or(self.enable_content_multiplier),
            enable_design_multiplier: other
                .enable_design_multiplier
                .or(self.enable_design_multiplier),
            enable_urgency_multiplier: other
                .enable_urgency_multiplier
                .or(self.enable_urgency_multiplier),
        }
    }

    pub fn all_multipliers(enabled: bool) -> Self {
        Self {
            enable_complexity_multiplier: Some(enabled),
            enable_language_multiplier: Some(enabled),
            enable_content_multiplier: Some(enabled),
            enable_design_multiplier: Some(enabled),
            enable_urgency_multiplier: Some(enabled),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKind {
    Base,
    Addon,
    Extra,
    Multiplier,
}

/// Either a money amount or a signed percentage such as `+20%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Money(i64),
    Percent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub label: String,
    pub label_ar: String,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: BreakdownKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub min: i64,
    pub max: i64,
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub name_ar: String,
    pub price: i64,
    pub duration_days: DayRange,
    pub includes: Vec<String>,
    pub includes_ar: Vec<String>,
    pub excludes: Vec<String>,
    pub excludes_ar: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub typical_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub hours: HoursRange,
    pub breakdown: Vec<BreakdownItem>,
    pub packages: Vec<Package>,
    pub pricing_paragraph_ar: String,
    pub pricing_paragraph_en: String,
}

/// `Math.round` semantics: halves round toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn rounding_step(currency: &str) -> i64 {
    if currency == DEFAULT_CURRENCY {
        5
    } else {
        10
    }
}

/// Round to the nearest 5 for USD and the nearest 10 for every other currency.
///
/// Values beyond the `i64` range clamp to the largest representable multiple of the step.
pub fn round_price(value: f64, currency: &str) -> i64 {
    let step = rounding_step(currency);
    round_half_up(value / step as f64).clamp(i64::MIN / step, i64::MAX / step) * step
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("validation failed: {}", .report.errors.join("; "))]
pub struct ValidationError {
    pub report: ValidationReport,
}

/// Loosely-typed request shape, checked by [`validate`] before pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub service_type: Option<String>,
    pub pricing_model: Option<String>,
    pub complexity: Option<String>,
    pub pages: Option<i64>,
    pub products: Option<i64>,
    pub languages: Option<String>,
    pub addons: Option<Vec<String>>,
    pub content_ready: Option<String>,
    pub design: Option<String>,
    pub urgency: Option<String>,
    pub currency: Option<String>,
    pub api_endpoints: Option<i64>,
    pub user_settings: Option<SettingsOverrides>,
}

impl ProjectDraft {
    pub fn into_specification(self) -> Result<ProjectSpecification, ValidationError> {
        let (spec, errors) = self.check();
        match spec {
            Some(spec) if errors.is_empty() => Ok(spec),
            _ => Err(ValidationError {
                report: ValidationReport::from_errors(errors),
            }),
        }
    }

    fn check(&self) -> (Option<ProjectSpecification>, Vec<String>) {
        let mut errors = Vec::new();

        let service_type = required_choice::<ServiceType>(
            self.service_type.as_deref(),
            "service_type",
            "Service type is required",
            &mut errors,
        );
        let pricing_model = required_choice::<PricingModel>(
            self.pricing_model.as_deref(),
            "pricing_model",
            "Pricing model is required",
            &mut errors,
        );
        let complexity = required_choice::<Complexity>(
            self.complexity.as_deref(),
            "complexity",
            "Complexity level is required",
            &mut errors,
        );
        let languages = required_choice::<Language>(
            self.languages.as_deref(),
            "languages",
            "Language selection is required",
            &mut errors,
        );
        let content_ready = required_choice::<ContentReadiness>(
            self.content_ready.as_deref(),
            "content_ready",
            "Content readiness is required",
            &mut errors,
        );
        let design = required_choice::<DesignType>(
            self.design.as_deref(),
            "design",
            "Design type is required",
            &mut errors,
        );
        let urgency = required_choice::<Urgency>(
            self.urgency.as_deref(),
            "urgency",
            "Urgency level is required",
            &mut errors,
        );

        let pages = bounded_count(self.pages, MAX_PAGES, "Pages", &mut errors);
        let products = bounded_count(self.products, MAX_PRODUCTS, "Products", &mut errors);

        let mut addons = Vec::new();
        for raw in self.addons.iter().flatten() {
            match Addon::parse(raw) {
                Some(addon) => addons.push(addon),
                None => errors.push(format!("Invalid addon: {raw}")),
            }
        }

        let api_endpoints = match self.api_endpoints {
            Some(count) if count < 1 => {
                errors.push("API endpoints must be at least 1".to_string());
                None
            }
            Some(count) => Some(u32::try_from(count).unwrap_or(u32::MAX)),
            None => None,
        };

        let currency = self
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(default_currency);

        let (
            Some(service_type),
            Some(pricing_model),
            Some(complexity),
            Some(languages),
            Some(content_ready),
            Some(design),
            Some(urgency),
        ) = (
            service_type,
            pricing_model,
            complexity,
            languages,
            content_ready,
            design,
            urgency,
        )
        else {
            return (None, errors);
        };

        let spec = ProjectSpecification {
            service_type,
            pricing_model,
            complexity,
            pages,
            products,
            languages,
            addons,
            content_ready,
            design,
            urgency,
            currency,
            api_endpoints,
        };
        (Some(spec), errors)
    }
}

/// Pre-flight check: one message per missing, unknown or out-of-range field.
pub fn validate(draft: &ProjectDraft) -> ValidationReport {
    let (_spec, errors) = draft.check();
    ValidationReport::from_errors(errors)
}

fn required_choice<T: Choice>(
    value: Option<&str>,
    field: &str,
    missing_message: &str,
    errors: &mut Vec<String>,
) -> Option<T> {
    let value = value.map(str::trim).filter(|v| !v.is_empty());
    let Some(value) = value else {
        errors.push(missing_message.to_string());
        return None;
    };
    let parsed = T::parse(value);
    if parsed.is_none() {
        errors.push(format!("Invalid {field}: {value}"));
    }
    parsed
}

fn bounded_count(value: Option<i64>, max: i64, name: &str, errors: &mut Vec<String>) -> u32 {
    match value {
        Some(v) if !(0..=max).contains(&v) => {
            errors.push(format!("{name} must be between 0 and {max}"));
            0
        }
        Some(v) => u32::try_from(v).unwrap_or(0),
        None => 0,
    }
}
