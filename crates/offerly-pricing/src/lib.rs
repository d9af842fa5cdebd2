//! Pricing calculator: rate card configuration, estimate arithmetic, packages
//! and the bilingual pricing paragraphs.

use std::path::Path;
use std::sync::OnceLock;

use offerly_core::{
    Addon, Amount, BreakdownItem, BreakdownKind, Complexity, ContentReadiness, DayRange,
    DesignType, HoursRange, Language, MultiplierCategory, Package, PricingResult,
    ProjectSpecification, ServiceType, SettingsOverrides, Urgency, UserSettings,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use offerly_core::{round_half_up, round_price, validate};

const SERVICE_PLACEHOLDER: &str = "{service}";
const MAX_LISTED_ADDONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub en: String,
    pub ar: String,
}

impl Label {
    pub fn new(en: &str, ar: &str) -> Self {
        Self {
            en: en.to_string(),
            ar: ar.to_string(),
        }
    }

    fn with_service(&self, service: &Label) -> Label {
        Label {
            en: self.en.replace(SERVICE_PLACEHOLDER, &service.en),
            ar: self.ar.replace(SERVICE_PLACEHOLDER, &service.ar),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRate {
    pub price: i64,
    pub hours: f64,
    pub label: Label,
}

impl ServiceRate {
    fn new(price: i64, hours: f64, en: &str, ar: &str) -> Self {
        Self {
            price,
            hours,
            label: Label::new(en, ar),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTable {
    pub landing_page: ServiceRate,
    pub wordpress_website: ServiceRate,
    pub woocommerce_store: ServiceRate,
    pub ui_fixes: ServiceRate,
    pub api_integration: ServiceRate,
    pub maintenance: ServiceRate,
    pub seo_basic: ServiceRate,
}

impl ServiceTable {
    pub fn get(&self, service_type: ServiceType) -> &ServiceRate {
        match service_type {
            ServiceType::LandingPage => &self.landing_page,
            ServiceType::WordpressWebsite => &self.wordpress_website,
            ServiceType::WoocommerceStore => &self.woocommerce_store,
            ServiceType::UiFixes => &self.ui_fixes,
            ServiceType::ApiIntegration => &self.api_integration,
            ServiceType::Maintenance => &self.maintenance,
            ServiceType::SeoBasic => &self.seo_basic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonTable {
    pub payment_gateway: ServiceRate,
    pub shipping_integration: ServiceRate,
    pub user_accounts: ServiceRate,
    pub admin_dashboard: ServiceRate,
    pub api_sync: ServiceRate,
    pub blog_setup: ServiceRate,
    pub performance_optimization: ServiceRate,
    pub seo_setup: ServiceRate,
}

impl AddonTable {
    pub fn get(&self, addon: Addon) -> &ServiceRate {
        match addon {
            Addon::PaymentGateway => &self.payment_gateway,
            Addon::ShippingIntegration => &self.shipping_integration,
            Addon::UserAccounts => &self.user_accounts,
            Addon::AdminDashboard => &self.admin_dashboard,
            Addon::ApiSync => &self.api_sync,
            Addon::BlogSetup => &self.blog_setup,
            Addon::PerformanceOptimization => &self.performance_optimization,
            Addon::SeoSetup => &self.seo_setup,
        }
    }
}

/// Overage pricing for pages, store products and API endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraRules {
    pub landing_page_included_pages: u32,
    pub website_included_pages: u32,
    pub page_price: i64,
    pub page_hours: f64,
    pub included_products: u32,
    pub product_price: i64,
    /// Product effort accrues per started block of this many extra products.
    pub product_block_size: u32,
    pub product_block_hours: f64,
    pub included_endpoints: u32,
    pub endpoint_price: i64,
    pub endpoint_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityFactors {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageFactors {
    pub arabic: f64,
    pub english: f64,
    pub both: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFactors {
    pub ready: f64,
    pub needs_copywriting: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFactors {
    pub template: f64,
    pub custom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyFactors {
    pub normal: f64,
    pub rush: f64,
    pub extreme: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTables {
    pub complexity: ComplexityFactors,
    pub languages: LanguageFactors,
    pub content: ContentFactors,
    pub design: DesignFactors,
    pub urgency: UrgencyFactors,
}

/// Factor selected for one category, with the display name of the chosen variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedMultiplier {
    pub category: MultiplierCategory,
    pub factor: f64,
    pub variant_en: &'static str,
    pub variant_ar: &'static str,
}

impl AppliedMultiplier {
    /// Signed whole-percent change, e.g. `+20%`.
    pub fn percent_delta(&self) -> String {
        format!("{:+}%", round_half_up((self.factor - 1.0) * 100.0))
    }

    fn breakdown_item(&self) -> BreakdownItem {
        BreakdownItem {
            label: format!(
                "Multiplier: {} ({} ×{})",
                self.category.label_en(),
                self.variant_en,
                self.factor
            ),
            label_ar: format!(
                "معامل: {} ({} ×{})",
                self.category.label_ar(),
                self.variant_ar,
                self.factor
            ),
            amount: Amount::Percent(self.percent_delta()),
            kind: BreakdownKind::Multiplier,
        }
    }
}

impl MultiplierTables {
    pub fn lookup(
        &self,
        category: MultiplierCategory,
        spec: &ProjectSpecification,
    ) -> AppliedMultiplier {
        let (factor, variant_en, variant_ar) = match category {
            MultiplierCategory::Complexity => {
                let factor = match spec.complexity {
                    Complexity::Low => self.complexity.low,
                    Complexity::Medium => self.complexity.medium,
                    Complexity::High => self.complexity.high,
                };
                (factor, spec.complexity.label_en(), spec.complexity.label_ar())
            }
            MultiplierCategory::Language => {
                let factor = match spec.languages {
                    Language::Arabic => self.languages.arabic,
                    Language::English => self.languages.english,
                    Language::Both => self.languages.both,
                };
                (factor, spec.languages.label_en(), spec.languages.label_ar())
            }
            MultiplierCategory::Content => {
                let factor = match spec.content_ready {
                    ContentReadiness::Ready => self.content.ready,
                    ContentReadiness::NeedsCopywriting => self.content.needs_copywriting,
                };
                (factor, spec.content_ready.label_en(), spec.content_ready.label_ar())
            }
            MultiplierCategory::Design => {
                let factor = match spec.design {
                    DesignType::Template => self.design.template,
                    DesignType::Custom => self.design.custom,
                };
                (factor, spec.design.label_en(), spec.design.label_ar())
            }
            MultiplierCategory::Urgency => {
                let factor = match spec.urgency {
                    Urgency::Normal => self.urgency.normal,
                    Urgency::Rush => self.urgency.rush,
                    Urgency::Extreme => self.urgency.extreme,
                };
                (factor, spec.urgency.label_en(), spec.urgency.label_ar())
            }
        };
        AppliedMultiplier {
            category,
            factor,
            variant_en,
            variant_ar,
        }
    }

    fn all_factors(&self) -> [f64; 13] {
        [
            self.complexity.low,
            self.complexity.medium,
            self.complexity.high,
            self.languages.arabic,
            self.languages.english,
            self.languages.both,
            self.content.ready,
            self.content.needs_copywriting,
            self.design.template,
            self.design.custom,
            self.urgency.normal,
            self.urgency.rush,
            self.urgency.extreme,
        ]
    }
}

/// Spread applied around the typical price and effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub min_price_factor: f64,
    pub max_price_factor: f64,
    pub min_hours_factor: f64,
    pub max_hours_factor: f64,
    pub hours_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageTier {
    pub name: Label,
    pub price_factor: f64,
    /// Offsets added to the base day count to form the delivery window.
    pub days_from: i64,
    pub days_to: i64,
    /// Features this tier adds on top of the previous tiers.
    #[serde(default)]
    pub additions: Vec<Label>,
    #[serde(default)]
    pub excludes: Vec<Label>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCatalog {
    /// Included in every tier; `{service}` is replaced by the service label.
    pub base_includes: Vec<Label>,
    pub basic: PackageTier,
    pub standard: PackageTier,
    pub premium: PackageTier,
}

impl PackageCatalog {
    pub fn tiers(&self) -> [&PackageTier; 3] {
        [&self.basic, &self.standard, &self.premium]
    }
}

#[derive(Debug, Error)]
pub enum RateCardError {
    #[error("reading rate card {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing rate card: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid rate card: {0}")]
    Invalid(String),
    #[error("serializing rate card: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Every constant the calculator needs, injected into [`PricingEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    pub services: ServiceTable,
    pub addons: AddonTable,
    pub extras: ExtraRules,
    pub multipliers: MultiplierTables,
    pub bands: Bands,
    pub packages: PackageCatalog,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            services: ServiceTable {
                landing_page: ServiceRate::new(150, 8.0, "Landing Page", "صفحة هبوط"),
                wordpress_website: ServiceRate::new(350, 20.0, "WordPress Website", "موقع ووردبريس"),
                woocommerce_store: ServiceRate::new(600, 35.0, "WooCommerce Store", "متجر ووكومرس"),
                ui_fixes: ServiceRate::new(80, 4.0, "UI Fixes", "إصلاحات واجهة المستخدم"),
                api_integration: ServiceRate::new(250, 15.0, "API Integration", "ربط API"),
                maintenance: ServiceRate::new(120, 6.0, "Maintenance", "صيانة"),
                seo_basic: ServiceRate::new(120, 8.0, "SEO Basic", "تحسين محركات البحث الأساسي"),
            },
            addons: AddonTable {
                payment_gateway: ServiceRate::new(150, 8.0, "Payment Gateway", "بوابة الدفع"),
                shipping_integration: ServiceRate::new(120, 6.0, "Shipping Integration", "ربط الشحن"),
                user_accounts: ServiceRate::new(120, 6.0, "User Accounts", "حسابات المستخدمين"),
                admin_dashboard: ServiceRate::new(300, 16.0, "Admin Dashboard", "لوحة تحكم المدير"),
                api_sync: ServiceRate::new(250, 12.0, "API Sync", "مزامنة API"),
                blog_setup: ServiceRate::new(80, 4.0, "Blog Setup", "إعداد المدونة"),
                performance_optimization: ServiceRate::new(
                    120,
                    6.0,
                    "Performance Optimization",
                    "تحسين الأداء",
                ),
                seo_setup: ServiceRate::new(100, 5.0, "SEO Setup", "إعداد SEO"),
            },
            extras: ExtraRules {
                landing_page_included_pages: 1,
                website_included_pages: 5,
                page_price: 30,
                page_hours: 1.5,
                included_products: 20,
                product_price: 2,
                product_block_size: 10,
                product_block_hours: 0.5,
                included_endpoints: 1,
                endpoint_price: 50,
                endpoint_hours: 3.0,
            },
            multipliers: MultiplierTables {
                complexity: ComplexityFactors {
                    low: 1.0,
                    medium: 1.2,
                    high: 1.4,
                },
                languages: LanguageFactors {
                    arabic: 1.0,
                    english: 1.0,
                    both: 1.15,
                },
                content: ContentFactors {
                    ready: 1.0,
                    needs_copywriting: 1.15,
                },
                design: DesignFactors {
                    template: 1.0,
                    custom: 1.2,
                },
                urgency: UrgencyFactors {
                    normal: 1.0,
                    rush: 1.25,
                    extreme: 1.4,
                },
            },
            bands: Bands {
                min_price_factor: 0.85,
                max_price_factor: 1.2,
                min_hours_factor: 0.85,
                max_hours_factor: 1.15,
                hours_per_day: 6.0,
            },
            packages: PackageCatalog {
                base_includes: vec![
                    Label::new("{service} development", "تطوير {service}"),
                    Label::new("Responsive design", "تصميم متجاوب"),
                    Label::new("Basic testing", "اختبار أساسي"),
                ],
                basic: PackageTier {
                    name: Label::new("Basic", "أساسي"),
                    price_factor: 0.9,
                    days_from: 0,
                    days_to: 3,
                    additions: vec![],
                    excludes: vec![
                        Label::new("Performance optimization", "تحسين الأداء"),
                        Label::new("SEO setup", "إعداد SEO"),
                        Label::new("Extended support", "دعم ممتد"),
                    ],
                },
                standard: PackageTier {
                    name: Label::new("Standard", "قياسي"),
                    price_factor: 1.0,
                    days_from: 0,
                    days_to: 3,
                    additions: vec![
                        Label::new("Performance optimization", "تحسين الأداء"),
                        Label::new("Basic SEO setup", "إعداد SEO أساسي"),
                        Label::new("Browser compatibility", "توافق المتصفحات"),
                    ],
                    excludes: vec![
                        Label::new("Extended support", "دعم ممتد"),
                        Label::new("Training", "تدريب"),
                        Label::new("Documentation", "توثيق"),
                    ],
                },
                premium: PackageTier {
                    name: Label::new("Premium", "متميز"),
                    price_factor: 1.25,
                    days_from: 2,
                    days_to: 7,
                    additions: vec![
                        Label::new("1 month support", "دعم لمدة شهر"),
                        Label::new("Priority revisions", "مراجعات ذات أولوية"),
                        Label::new("Documentation", "توثيق"),
                        Label::new("Training session", "جلسة تدريبية"),
                    ],
                    excludes: vec![],
                },
            },
        }
    }
}

impl RateCard {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RateCardError> {
        let card: RateCard = serde_yaml::from_str(yaml)?;
        card.check()?;
        Ok(card)
    }

    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, RateCardError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RateCardError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let card = Self::from_yaml_str(&yaml)?;
        info!(path = %path.display(), "loaded rate card");
        Ok(card)
    }

    pub fn to_yaml_string(&self) -> Result<String, RateCardError> {
        serde_yaml::to_string(self).map_err(RateCardError::Serialize)
    }

    /// Reject values that would make the arithmetic meaningless.
    pub fn check(&self) -> Result<(), RateCardError> {
        if !(self.bands.hours_per_day.is_finite() && self.bands.hours_per_day > 0.0) {
            return Err(RateCardError::Invalid(
                "bands.hours_per_day must be a positive number".to_string(),
            ));
        }
        if self.extras.product_block_size == 0 {
            return Err(RateCardError::Invalid(
                "extras.product_block_size must be at least 1".to_string(),
            ));
        }
        if let Some(bad) = self
            .multipliers
            .all_factors()
            .into_iter()
            .find(|f| !(f.is_finite() && *f > 0.0))
        {
            return Err(RateCardError::Invalid(format!(
                "multiplier factors must be positive, found {bad}"
            )));
        }
        Ok(())
    }
}

/// Price and hour contribution of pages, products and endpoints over the included amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtraCost {
    pub price: i64,
    pub hours: f64,
}

#[derive(Debug, Clone, Copy)]
struct Estimate {
    typical_price: i64,
    min_price: i64,
    max_price: i64,
    hours: HoursRange,
}

#[derive(Debug, Clone, Copy)]
struct Phrase {
    en: &'static str,
    ar: &'static str,
}

const ADVANCED_SEO: Phrase = Phrase {
    en: "Advanced SEO",
    ar: "تحسين SEO متقدم",
};
const MONTHLY_MAINTENANCE: Phrase = Phrase {
    en: "Monthly maintenance",
    ar: "الصيانة الشهرية",
};
const ASK_PAGE_COUNT: Phrase = Phrase {
    en: "How many pages are required?",
    ar: "كم عدد الصفحات المطلوبة؟",
};
const ASK_PRODUCT_COUNT: Phrase = Phrase {
    en: "How many products are expected?",
    ar: "كم عدد المنتجات المتوقعة؟",
};

/// Stateless calculator over an injected [`RateCard`].
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    rates: RateCard,
}

impl PricingEngine {
    pub fn new(rates: RateCard) -> Self {
        Self { rates }
    }

    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, RateCardError> {
        RateCard::from_yaml_path(path).map(Self::new)
    }

    pub fn rates(&self) -> &RateCard {
        &self.rates
    }

    /// Merge `overrides` over the default settings and price `spec`.
    pub fn calculate(
        &self,
        spec: &ProjectSpecification,
        overrides: &SettingsOverrides,
    ) -> PricingResult {
        self.calculate_with_settings(spec, &overrides.resolve())
    }

    pub fn calculate_with_settings(
        &self,
        spec: &ProjectSpecification,
        settings: &UserSettings,
    ) -> PricingResult {
        let service = self.rates.services.get(spec.service_type);
        let mut breakdown = vec![BreakdownItem {
            label: format!("Base ({})", service.label.en),
            label_ar: format!("الأساس ({})", service.label.ar),
            amount: Amount::Money(service.price),
            kind: BreakdownKind::Base,
        }];

        let mut subtotal_price = service.price;
        let mut subtotal_hours = service.hours;

        for addon in &spec.addons {
            let rate = self.rates.addons.get(*addon);
            subtotal_price = subtotal_price.saturating_add(rate.price);
            subtotal_hours += rate.hours;
            breakdown.push(BreakdownItem {
                label: format!("Add-on: {}", rate.label.en),
                label_ar: format!("إضافة: {}", rate.label.ar),
                amount: Amount::Money(rate.price),
                kind: BreakdownKind::Addon,
            });
        }

        let extras = self.extras(spec);
        if extras.price > 0 {
            breakdown.push(BreakdownItem {
                label: "Extra pages/products".to_string(),
                label_ar: "صفحات/منتجات إضافية".to_string(),
                amount: Amount::Money(extras.price),
                kind: BreakdownKind::Extra,
            });
        }
        subtotal_price = subtotal_price.saturating_add(extras.price);
        subtotal_hours += extras.hours;

        let applied = self.active_multipliers(spec, settings);
        let multiplier = applied.iter().fold(1.0, |acc, m| acc * m.factor);
        breakdown.extend(
            applied
                .iter()
                .filter(|m| m.factor != 1.0)
                .map(AppliedMultiplier::breakdown_item),
        );

        let currency = spec.currency.as_str();
        let bands = &self.rates.bands;
        let raw_price = subtotal_price as f64 * multiplier;
        let typical_price = round_price(raw_price.max(settings.minimum_project_price), currency);
        let min_price = round_price(typical_price as f64 * bands.min_price_factor, currency);
        let max_price = round_price(typical_price as f64 * bands.max_price_factor, currency);

        let typical_hours = subtotal_hours * multiplier;
        let hours = HoursRange {
            min: round_half_up(typical_hours * bands.min_hours_factor),
            max: round_half_up(typical_hours * bands.max_hours_factor),
        };

        let estimate = Estimate {
            typical_price,
            min_price,
            max_price,
            hours,
        };
        let packages = self.packages(spec, typical_price, typical_hours);
        let pricing_paragraph_ar = self.paragraph_ar(spec, &estimate);
        let pricing_paragraph_en = self.paragraph_en(spec, &estimate);

        debug!(
            service_type = %spec.service_type,
            subtotal_price,
            multiplier,
            typical_price,
            min_hours = hours.min,
            max_hours = hours.max,
            "calculated pricing estimate"
        );

        PricingResult {
            typical_price,
            min_price,
            max_price,
            hours,
            breakdown,
            packages,
            pricing_paragraph_ar,
            pricing_paragraph_en,
        }
    }

    /// Overage cost for the service type; zero when counts are within the included amounts.
    pub fn extras(&self, spec: &ProjectSpecification) -> ExtraCost {
        let rules = &self.rates.extras;
        let mut cost = ExtraCost::default();

        if spec.service_type.is_website() {
            let included = if spec.service_type == ServiceType::LandingPage {
                rules.landing_page_included_pages
            } else {
                rules.website_included_pages
            };
            let extra_pages = spec.pages.saturating_sub(included);
            cost.price = cost
                .price
                .saturating_add(i64::from(extra_pages).saturating_mul(rules.page_price));
            cost.hours += f64::from(extra_pages) * rules.page_hours;
        }

        if spec.service_type.is_store() {
            let extra_products = spec.products.saturating_sub(rules.included_products);
            cost.price = cost
                .price
                .saturating_add(i64::from(extra_products).saturating_mul(rules.product_price));
            let blocks = extra_products.div_ceil(rules.product_block_size.max(1));
            cost.hours += f64::from(blocks) * rules.product_block_hours;
        }

        if spec.service_type == ServiceType::ApiIntegration {
            if let Some(endpoints) = spec.api_endpoints {
                let extra_endpoints = endpoints.saturating_sub(rules.included_endpoints);
                cost.price = cost
                    .price
                    .saturating_add(i64::from(extra_endpoints).saturating_mul(rules.endpoint_price));
                cost.hours += f64::from(extra_endpoints) * rules.endpoint_hours;
            }
        }

        cost
    }

    /// Multipliers for every enabled category, in application order.
    pub fn active_multipliers(
        &self,
        spec: &ProjectSpecification,
        settings: &UserSettings,
    ) -> Vec<AppliedMultiplier> {
        MultiplierCategory::ORDERED
            .into_iter()
            .filter(|category| settings.multiplier_enabled(*category))
            .map(|category| self.rates.multipliers.lookup(category, spec))
            .collect()
    }

    fn days_for_hours(&self, hours: f64) -> i64 {
        (hours / self.rates.bands.hours_per_day).ceil() as i64
    }

    fn packages(
        &self,
        spec: &ProjectSpecification,
        typical_price: i64,
        typical_hours: f64,
    ) -> Vec<Package> {
        let catalog = &self.rates.packages;
        let service = &self.rates.services.get(spec.service_type).label;
        let base_days = self.days_for_hours(typical_hours);

        let mut includes: Vec<Label> = catalog
            .base_includes
            .iter()
            .map(|label| label.with_service(service))
            .collect();

        catalog
            .tiers()
            .into_iter()
            .map(|tier| {
                includes.extend(tier.additions.iter().cloned());
                Package {
                    name: tier.name.en.clone(),
                    name_ar: tier.name.ar.clone(),
                    price: round_price(typical_price as f64 * tier.price_factor, &spec.currency),
                    duration_days: DayRange {
                        min: base_days.saturating_add(tier.days_from),
                        max: base_days.saturating_add(tier.days_to),
                    },
                    includes: includes.iter().map(|l| l.en.clone()).collect(),
                    includes_ar: includes.iter().map(|l| l.ar.clone()).collect(),
                    excludes: tier.excludes.iter().map(|l| l.en.clone()).collect(),
                    excludes_ar: tier.excludes.iter().map(|l| l.ar.clone()).collect(),
                }
            })
            .collect()
    }

    fn included_items<'a>(&'a self, spec: &ProjectSpecification) -> Vec<&'a Label> {
        let mut items = vec![&self.rates.services.get(spec.service_type).label];
        items.extend(
            spec.addons
                .iter()
                .take(MAX_LISTED_ADDONS)
                .map(|addon| &self.rates.addons.get(*addon).label),
        );
        items
    }

    fn paragraph_en(&self, spec: &ProjectSpecification, estimate: &Estimate) -> String {
        let currency = spec.currency.as_str();
        let mut lines = vec![
            format!(
                "💰 **Suggested Price Range:** {} - {} (Typical: {})",
                money_en(estimate.min_price, currency),
                money_en(estimate.max_price, currency),
                money_en(estimate.typical_price, currency)
            ),
            format!(
                "⏱️ **Estimated Duration:** {}-{} business days",
                self.days_for_hours(estimate.hours.min as f64),
                self.days_for_hours(estimate.hours.max as f64)
            ),
            String::new(),
            "✅ **Price Includes:**".to_string(),
        ];
        lines.extend(self.included_items(spec).iter().map(|l| format!("• {}", l.en)));

        let excludes = excluded_items(spec);
        if !excludes.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "❌ **Not Included:** {}",
                excludes.iter().map(|p| p.en).collect::<Vec<_>>().join(", ")
            ));
        }

        let questions = clarifying_questions(spec);
        if !questions.is_empty() {
            lines.push(String::new());
            lines.push("❓ **To Clarify:**".to_string());
            lines.extend(questions.iter().map(|q| format!("• {}", q.en)));
        }

        finish_paragraph(lines)
    }

    fn paragraph_ar(&self, spec: &ProjectSpecification, estimate: &Estimate) -> String {
        let currency = currency_name_ar(&spec.currency);
        let mut lines = vec![
            format!(
                "💰 **نطاق السعر المقترح:** {} - {} {currency} (السعر النموذجي: {} {currency})",
                estimate.min_price, estimate.max_price, estimate.typical_price
            ),
            format!(
                "⏱️ **مدة التنفيذ المتوقعة:** {}-{} أيام عمل",
                self.days_for_hours(estimate.hours.min as f64),
                self.days_for_hours(estimate.hours.max as f64)
            ),
            String::new(),
            "✅ **يشمل السعر:**".to_string(),
        ];
        lines.extend(self.included_items(spec).iter().map(|l| format!("• {}", l.ar)));

        let excludes = excluded_items(spec);
        if !excludes.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "❌ **لا يشمل:** {}",
                excludes.iter().map(|p| p.ar).collect::<Vec<_>>().join("، ")
            ));
        }

        let questions = clarifying_questions(spec);
        if !questions.is_empty() {
            lines.push(String::new());
            lines.push("❓ **للتوضيح:**".to_string());
            lines.extend(questions.iter().map(|q| format!("• {}", q.ar)));
        }

        finish_paragraph(lines)
    }
}

fn excluded_items(spec: &ProjectSpecification) -> Vec<Phrase> {
    let mut excludes = Vec::new();
    if !spec.has_addon(Addon::SeoSetup) {
        excludes.push(ADVANCED_SEO);
    }
    if !spec.has_addon(Addon::PerformanceOptimization) {
        excludes.push(MONTHLY_MAINTENANCE);
    }
    excludes
}

fn clarifying_questions(spec: &ProjectSpecification) -> Vec<Phrase> {
    let mut questions = Vec::new();
    if spec.pages == 0 && spec.service_type.asks_for_page_count() {
        questions.push(ASK_PAGE_COUNT);
    }
    if spec.products == 0 && spec.service_type.is_store() {
        questions.push(ASK_PRODUCT_COUNT);
    }
    questions
}

fn finish_paragraph(lines: Vec<String>) -> String {
    let mut paragraph = lines.join("\n");
    paragraph.push('\n');
    paragraph
}

/// Display-only currency formatting; amounts are never converted.
pub fn money_en(amount: i64, currency: &str) -> String {
    match currency {
        "USD" => format!("${amount}"),
        "EUR" => format!("€{amount}"),
        "GBP" => format!("£{amount}"),
        other => format!("{amount} {other}"),
    }
}

pub fn currency_name_ar(currency: &str) -> &str {
    match currency {
        "USD" => "دولار",
        "EUR" => "يورو",
        "GBP" => "جنيه إسترليني",
        other => other,
    }
}

pub fn default_engine() -> &'static PricingEngine {
    static ENGINE: OnceLock<PricingEngine> = OnceLock::new();
    ENGINE.get_or_init(PricingEngine::default)
}

/// Price `spec` with the built-in rate card.
pub fn calculate(spec: &ProjectSpecification, overrides: &SettingsOverrides) -> PricingResult {
    default_engine().calculate(spec, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerly_core::{Choice, PricingModel};
    use std::path::PathBuf;

    fn spec(service_type: ServiceType) -> ProjectSpecification {
        ProjectSpecification::baseline(service_type)
    }

    fn price(spec: &ProjectSpecification) -> i64 {
        calculate(spec, &SettingsOverrides::default()).typical_price
    }

    fn workspace_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    #[test]
    fn basic_wordpress_site_matches_rate_table() {
        let spec = ProjectSpecification {
            pages: 5,
            ..spec(ServiceType::WordpressWebsite)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        assert_eq!(result.typical_price, 350);
        assert_eq!(result.min_price, 300);
        assert_eq!(result.max_price, 420);
        assert_eq!(result.hours, HoursRange { min: 17, max: 23 });
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].label, "Base (WordPress Website)");
        assert_eq!(result.breakdown[0].amount, Amount::Money(350));
        assert_eq!(result.breakdown[0].kind, BreakdownKind::Base);
    }

    #[test]
    fn complexity_multiplier_scales_price() {
        let low = spec(ServiceType::ApiIntegration);
        let medium = ProjectSpecification {
            complexity: Complexity::Medium,
            ..low.clone()
        };
        let high = ProjectSpecification {
            complexity: Complexity::High,
            ..low.clone()
        };
        assert_eq!(price(&low), 250);
        assert_eq!(price(&medium), 300);
        assert_eq!(price(&high), 350);
    }

    #[test]
    fn addons_and_multipliers_compose_in_order() {
        let spec = ProjectSpecification {
            complexity: Complexity::High,
            languages: Language::Both,
            addons: vec![Addon::AdminDashboard, Addon::ApiSync],
            ..spec(ServiceType::ApiIntegration)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        assert_eq!(result.typical_price, 1290);

        let kinds: Vec<_> = result.breakdown.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BreakdownKind::Base,
                BreakdownKind::Addon,
                BreakdownKind::Addon,
                BreakdownKind::Multiplier,
                BreakdownKind::Multiplier,
            ]
        );
        assert_eq!(result.breakdown[1].label, "Add-on: Admin Dashboard");
        assert_eq!(result.breakdown[1].amount, Amount::Money(300));
        assert_eq!(result.breakdown[2].amount, Amount::Money(250));
        assert_eq!(result.breakdown[3].label, "Multiplier: Complexity (High ×1.4)");
        assert_eq!(result.breakdown[3].amount, Amount::Percent("+40%".into()));
        assert_eq!(result.breakdown[4].label, "Multiplier: Languages (Both ×1.15)");
        assert_eq!(result.breakdown[4].label_ar, "معامل: اللغات (كلاهما ×1.15)");
        assert_eq!(result.breakdown[4].amount, Amount::Percent("+15%".into()));
    }

    #[test]
    fn medium_complexity_with_two_languages() {
        let spec = ProjectSpecification {
            complexity: Complexity::Medium,
            languages: Language::Both,
            addons: vec![Addon::AdminDashboard, Addon::ApiSync],
            ..spec(ServiceType::ApiIntegration)
        };
        assert_eq!(price(&spec), 1105);
    }

    #[test]
    fn urgency_multiplier_rounds_to_usd_step() {
        let normal = ProjectSpecification {
            pages: 1,
            ..spec(ServiceType::LandingPage)
        };
        let rush = ProjectSpecification {
            urgency: Urgency::Rush,
            ..normal.clone()
        };
        let extreme = ProjectSpecification {
            urgency: Urgency::Extreme,
            ..normal.clone()
        };
        assert_eq!(price(&normal), 150);
        assert_eq!(price(&rush), 190);
        assert_eq!(price(&extreme), 210);

        let result = calculate(&rush, &SettingsOverrides::default());
        let last = result.breakdown.last().expect("urgency entry");
        assert_eq!(last.label, "Multiplier: Urgency (Rush <7 days ×1.25)");
        assert_eq!(last.amount, Amount::Percent("+25%".into()));
    }

    #[test]
    fn extra_pages_are_charged_beyond_included_count() {
        let spec = ProjectSpecification {
            pages: 10,
            ..spec(ServiceType::WordpressWebsite)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        assert_eq!(result.typical_price, 500);
        let extra = &result.breakdown[1];
        assert_eq!(extra.kind, BreakdownKind::Extra);
        assert_eq!(extra.label, "Extra pages/products");
        assert_eq!(extra.amount, Amount::Money(150));
    }

    #[test]
    fn landing_page_includes_a_single_page() {
        let engine = PricingEngine::default();
        let spec = ProjectSpecification {
            pages: 3,
            ..spec(ServiceType::LandingPage)
        };
        assert_eq!(engine.extras(&spec), ExtraCost { price: 60, hours: 3.0 });
    }

    #[test]
    fn store_products_add_price_per_unit_and_hours_per_block() {
        let engine = PricingEngine::default();
        let store = ProjectSpecification {
            pages: 5,
            products: 50,
            ..spec(ServiceType::WoocommerceStore)
        };
        assert_eq!(price(&store), 660);
        assert_eq!(engine.extras(&store), ExtraCost { price: 60, hours: 1.5 });

        let one_over = ProjectSpecification {
            products: 21,
            ..store.clone()
        };
        assert_eq!(engine.extras(&one_over), ExtraCost { price: 2, hours: 0.5 });
    }

    #[test]
    fn products_only_count_for_stores() {
        let engine = PricingEngine::default();
        let site = ProjectSpecification {
            products: 500,
            ..spec(ServiceType::WordpressWebsite)
        };
        assert_eq!(engine.extras(&site), ExtraCost::default());
    }

    #[test]
    fn api_endpoints_beyond_the_first_are_charged() {
        let engine = PricingEngine::default();
        let api = ProjectSpecification {
            api_endpoints: Some(3),
            ..spec(ServiceType::ApiIntegration)
        };
        assert_eq!(engine.extras(&api), ExtraCost { price: 100, hours: 6.0 });
        assert_eq!(price(&api), 350);

        let single = ProjectSpecification {
            api_endpoints: Some(1),
            ..api.clone()
        };
        assert_eq!(engine.extras(&single), ExtraCost::default());
    }

    #[test]
    fn minimum_project_price_floors_small_jobs() {
        let overrides = SettingsOverrides {
            minimum_project_price: Some(150.0),
            ..SettingsOverrides::default()
        };
        let result = calculate(&spec(ServiceType::UiFixes), &overrides);
        assert_eq!(result.typical_price, 150);

        // Default floor of 100 still beats the 80 base.
        assert_eq!(price(&spec(ServiceType::UiFixes)), 100);
    }

    #[test]
    fn disabled_multipliers_leave_subtotal_untouched() {
        let spec = ProjectSpecification {
            complexity: Complexity::High,
            languages: Language::Both,
            content_ready: ContentReadiness::NeedsCopywriting,
            design: DesignType::Custom,
            urgency: Urgency::Extreme,
            ..spec(ServiceType::ApiIntegration)
        };
        let result = calculate(&spec, &SettingsOverrides::all_multipliers(false));
        assert_eq!(result.typical_price, 250);
        assert!(result
            .breakdown
            .iter()
            .all(|item| item.kind != BreakdownKind::Multiplier));
    }

    #[test]
    fn only_enabled_categories_contribute() {
        let spec = ProjectSpecification {
            design: DesignType::Custom,
            urgency: Urgency::Rush,
            ..spec(ServiceType::WordpressWebsite)
        };
        let overrides = SettingsOverrides {
            enable_design_multiplier: Some(false),
            ..SettingsOverrides::default()
        };
        let result = calculate(&spec, &overrides);
        // 350 × 1.25 = 437.5
        assert_eq!(result.typical_price, 440);
        let multipliers: Vec<_> = result
            .breakdown
            .iter()
            .filter(|b| b.kind == BreakdownKind::Multiplier)
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(multipliers, vec!["Multiplier: Urgency (Rush <7 days ×1.25)"]);
    }

    #[test]
    fn three_packages_derive_from_typical_price() {
        let spec = ProjectSpecification {
            complexity: Complexity::Medium,
            pages: 5,
            ..spec(ServiceType::WordpressWebsite)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        assert_eq!(result.typical_price, 420);

        let names: Vec<_> = result.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Basic", "Standard", "Premium"]);

        let [basic, standard, premium] = &result.packages[..] else {
            panic!("expected three packages");
        };
        assert_eq!(basic.price, 380);
        assert_eq!(standard.price, 420);
        assert_eq!(premium.price, 525);

        // 20h × 1.2 = 24h → 4 base days
        assert_eq!(basic.duration_days, DayRange { min: 4, max: 7 });
        assert_eq!(standard.duration_days, DayRange { min: 4, max: 7 });
        assert_eq!(premium.duration_days, DayRange { min: 6, max: 11 });

        assert_eq!(basic.includes[0], "WordPress Website development");
        assert_eq!(basic.includes_ar[0], "تطوير موقع ووردبريس");
        assert_eq!(basic.includes.len(), 3);
        assert_eq!(standard.includes.len(), 6);
        assert!(standard.includes.contains(&"Browser compatibility".to_string()));
        assert_eq!(premium.includes.len(), 10);
        assert!(premium.includes.contains(&"Training session".to_string()));
        assert_eq!(basic.excludes, vec!["Performance optimization", "SEO setup", "Extended support"]);
        assert_eq!(standard.excludes, vec!["Extended support", "Training", "Documentation"]);
        assert!(premium.excludes.is_empty());
        assert!(premium.excludes_ar.is_empty());
    }

    #[test]
    fn english_paragraph_lists_range_duration_and_exclusions() {
        let spec = ProjectSpecification {
            pages: 5,
            ..spec(ServiceType::WordpressWebsite)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        assert_eq!(
            result.pricing_paragraph_en,
            "💰 **Suggested Price Range:** $300 - $420 (Typical: $350)\n\
             ⏱️ **Estimated Duration:** 3-4 business days\n\
             \n\
             ✅ **Price Includes:**\n\
             • WordPress Website\n\
             \n\
             ❌ **Not Included:** Advanced SEO, Monthly maintenance\n"
        );
    }

    #[test]
    fn arabic_paragraph_asks_about_missing_counts() {
        let spec = ProjectSpecification {
            complexity: Complexity::Medium,
            languages: Language::Both,
            addons: vec![
                Addon::PaymentGateway,
                Addon::ShippingIntegration,
                Addon::SeoSetup,
                Addon::PerformanceOptimization,
            ],
            design: DesignType::Custom,
            urgency: Urgency::Rush,
            ..spec(ServiceType::WoocommerceStore)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        let ar = &result.pricing_paragraph_ar;
        assert!(ar.contains("نطاق السعر المقترح"));
        assert!(ar.contains("مدة التنفيذ"));
        assert!(ar.contains("يشمل السعر"));
        assert!(ar.contains("• متجر ووكومرس\n"));
        assert!(ar.contains("• إعداد SEO\n"));
        // Only the first three add-ons are listed.
        assert!(!ar.contains("• تحسين الأداء\n"));
        // Both exclusions are covered by add-ons.
        assert!(!ar.contains("لا يشمل"));
        assert!(ar.contains("كم عدد الصفحات المطلوبة؟"));
        assert!(ar.contains("كم عدد المنتجات المتوقعة؟"));
        assert!(result.pricing_paragraph_en.contains("How many products are expected?"));
    }

    #[test]
    fn non_usd_currencies_round_to_ten_and_keep_their_code() {
        let spec = ProjectSpecification {
            currency: "SAR".into(),
            ..spec(ServiceType::UiFixes)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        assert_eq!(result.typical_price, 100);
        assert_eq!(result.min_price % 10, 0);
        assert_eq!(result.max_price % 10, 0);
        assert!(result.pricing_paragraph_en.contains("(Typical: 100 SAR)"));
        assert!(result.pricing_paragraph_ar.contains("السعر النموذجي: 100 SAR"));
    }

    #[test]
    fn neutral_inputs_price_at_base_rate_for_every_service() {
        let engine = PricingEngine::default();
        for service in ServiceType::ALL {
            let spec = spec(*service);
            let base = engine.rates().services.get(*service).price;
            let expected = round_price((base as f64).max(100.0), "USD");
            assert_eq!(price(&spec), expected, "{service}");
        }
    }

    #[test]
    fn ranges_and_packages_are_ordered_for_all_enum_combinations() {
        let addon_sets = [
            vec![],
            vec![Addon::SeoSetup],
            vec![Addon::PaymentGateway, Addon::AdminDashboard, Addon::BlogSetup, Addon::ApiSync],
        ];
        for service in ServiceType::ALL {
            for complexity in Complexity::ALL {
                for languages in Language::ALL {
                    for content_ready in ContentReadiness::ALL {
                        for design in DesignType::ALL {
                            for urgency in Urgency::ALL {
                                for addons in &addon_sets {
                                    let spec = ProjectSpecification {
                                        service_type: *service,
                                        pricing_model: PricingModel::Fixed,
                                        complexity: *complexity,
                                        pages: 12,
                                        products: 45,
                                        languages: *languages,
                                        addons: addons.clone(),
                                        content_ready: *content_ready,
                                        design: *design,
                                        urgency: *urgency,
                                        currency: "USD".into(),
                                        api_endpoints: Some(4),
                                    };
                                    let result = calculate(&spec, &SettingsOverrides::default());
                                    assert!(result.min_price <= result.typical_price);
                                    assert!(result.typical_price <= result.max_price);
                                    assert!(result.hours.min <= result.hours.max);
                                    assert_eq!(result.typical_price % 5, 0);
                                    let [basic, standard, premium] = &result.packages[..] else {
                                        panic!("expected three packages");
                                    };
                                    assert!(basic.price <= standard.price);
                                    assert_eq!(standard.price, result.typical_price);
                                    assert!(standard.price <= premium.price);

                                    let flat = calculate(&spec, &SettingsOverrides::all_multipliers(false));
                                    let engine = default_engine();
                                    let subtotal = engine.rates().services.get(*service).price
                                        + addons
                                            .iter()
                                            .map(|a| engine.rates().addons.get(*a).price)
                                            .sum::<i64>()
                                        + engine.extras(&spec).price;
                                    assert_eq!(
                                        flat.typical_price,
                                        round_price((subtotal as f64).max(100.0), "USD")
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn pricing_model_does_not_change_the_estimate() {
        let fixed = ProjectSpecification {
            complexity: Complexity::High,
            ..spec(ServiceType::Maintenance)
        };
        let hourly = ProjectSpecification {
            pricing_model: PricingModel::Hourly,
            ..fixed.clone()
        };
        assert_eq!(
            calculate(&fixed, &SettingsOverrides::default()),
            calculate(&hourly, &SettingsOverrides::default())
        );
    }

    #[test]
    fn identical_inputs_produce_identical_results() {
        let spec = ProjectSpecification {
            pages: 14,
            products: 230,
            addons: vec![Addon::UserAccounts, Addon::BlogSetup],
            urgency: Urgency::Extreme,
            ..spec(ServiceType::WoocommerceStore)
        };
        let first = serde_json::to_string(&calculate(&spec, &SettingsOverrides::default()))
            .expect("json");
        let second = serde_json::to_string(&calculate(&spec, &SettingsOverrides::default()))
            .expect("json");
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_counts_do_not_panic() {
        let store = ProjectSpecification {
            pages: u32::MAX,
            products: u32::MAX,
            ..spec(ServiceType::WoocommerceStore)
        };
        let result = calculate(&store, &SettingsOverrides::default());
        assert!(result.typical_price > 0);

        let api = ProjectSpecification {
            api_endpoints: Some(u32::MAX),
            ..spec(ServiceType::ApiIntegration)
        };
        assert!(price(&api) > 0);
    }

    #[test]
    fn huge_minimum_price_saturates_instead_of_overflowing() {
        for minimum in [1e300, f64::MAX] {
            let overrides = SettingsOverrides {
                minimum_project_price: Some(minimum),
                ..SettingsOverrides::default()
            };
            for currency in ["USD", "EUR"] {
                let spec = ProjectSpecification {
                    currency: currency.into(),
                    ..spec(ServiceType::UiFixes)
                };
                let result = calculate(&spec, &overrides);
                let step = offerly_core::rounding_step(currency);
                assert_eq!(result.typical_price, (i64::MAX / step) * step);
                assert!(result.min_price <= result.typical_price);
                assert!(result.typical_price <= result.max_price);
                let [basic, standard, premium] = &result.packages[..] else {
                    panic!("expected three packages");
                };
                assert!(basic.price <= standard.price);
                assert!(standard.price <= premium.price);
            }
        }
    }

    #[test]
    fn duplicate_addons_are_each_counted() {
        let spec = ProjectSpecification {
            addons: vec![Addon::BlogSetup, Addon::BlogSetup],
            ..spec(ServiceType::WordpressWebsite)
        };
        let result = calculate(&spec, &SettingsOverrides::default());
        assert_eq!(result.typical_price, 510);
        assert_eq!(
            result
                .breakdown
                .iter()
                .filter(|b| b.kind == BreakdownKind::Addon)
                .count(),
            2
        );
    }

    #[test]
    fn shipped_rate_card_matches_built_in_defaults() {
        let card = RateCard::from_yaml_path(workspace_root().join("config/rates.yaml"))
            .expect("config/rates.yaml");
        assert_eq!(card, RateCard::default());
    }

    #[test]
    fn rate_card_round_trips_through_yaml() {
        let yaml = RateCard::default().to_yaml_string().expect("yaml");
        let parsed = RateCard::from_yaml_str(&yaml).expect("parse");
        assert_eq!(parsed, RateCard::default());
    }

    #[test]
    fn alternate_rate_card_changes_prices_without_code_changes() {
        let mut rates = RateCard::default();
        rates.services.wordpress_website.price = 150;
        rates.multipliers.design.custom = 0.9;
        let engine = PricingEngine::new(rates);

        let spec = ProjectSpecification {
            design: DesignType::Custom,
            ..spec(ServiceType::WordpressWebsite)
        };
        let result = engine.calculate(&spec, &SettingsOverrides::default());
        assert_eq!(result.typical_price, 135);
        assert_eq!(
            result.breakdown.last().map(|b| b.amount.clone()),
            Some(Amount::Percent("-10%".into()))
        );
    }

    #[test]
    fn rate_card_file_loading_reports_bad_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rates.yaml");

        let mut rates = RateCard::default();
        rates.extras.product_block_size = 0;
        std::fs::write(&path, rates.to_yaml_string().expect("yaml")).expect("write");
        let err = RateCard::from_yaml_path(&path).expect_err("zero block size");
        assert!(matches!(err, RateCardError::Invalid(_)));

        std::fs::write(&path, "services: [").expect("write");
        assert!(matches!(
            RateCard::from_yaml_path(&path),
            Err(RateCardError::Parse(_))
        ));

        assert!(matches!(
            RateCard::from_yaml_path(dir.path().join("missing.yaml")),
            Err(RateCardError::Read { .. })
        ));
    }
}
