//! Immutable lookup registry.
//!
//! All mapping tables the resolvers depend on (region groups, country
//! records, indicator aliases and catalogs, per-provider configuration) are
//! loaded once at startup into a `Registry` and injected by reference into
//! each component. Tests build fixture registries through the same builder.

use std::collections::HashMap;
use std::time::Duration;

use oikos_types::{ProviderId, ProviderConfig, RateLimitConfig};

/// One country in the shared name table, carrying both code alphabets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    /// Canonical display name.
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code.
    pub iso2: &'static str,
    /// ISO 3166-1 alpha-3 code.
    pub iso3: &'static str,
}

/// One entry in a provider's indicator catalog, used by the keyword search
/// fallback when no alias matches.
#[derive(Debug, Clone)]
pub struct IndicatorEntry {
    /// Provider-specific indicator code.
    pub code: &'static str,
    /// Descriptive name as the provider publishes it.
    pub name: &'static str,
    /// Keywords the search scores a phrase against.
    pub keywords: &'static [&'static str],
}

/// Which code alphabet a provider expects in its country dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeAlphabet {
    /// Two-letter ISO codes (Eurostat, IMF).
    Iso2,
    /// Three-letter ISO codes (World Bank, OECD).
    Iso3,
}

/// Normalize a free-form name for table lookup: lowercase, punctuation
/// stripped, whitespace collapsed to single spaces.
#[must_use]
pub fn normalize_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

/// Normalize a region group key: the uppercase form of [`normalize_name`].
#[must_use]
pub fn normalize_region_key(input: &str) -> String {
    normalize_name(input).to_uppercase()
}

/// Immutable registry of mapping tables, built once and shared by reference.
pub struct Registry {
    countries: Vec<CountryRecord>,
    name_index: HashMap<String, usize>,
    iso2_index: HashMap<&'static str, usize>,
    iso3_index: HashMap<&'static str, usize>,
    regions: HashMap<String, Vec<&'static str>>,
    eu_members: Vec<&'static str>,
    alphabets: HashMap<ProviderId, CodeAlphabet>,
    code_fixups: Vec<((ProviderId, &'static str), &'static str)>,
    aliases: HashMap<(ProviderId, String), String>,
    catalogs: HashMap<ProviderId, Vec<IndicatorEntry>>,
    pinned: Vec<(&'static str, ProviderId)>,
    configs: HashMap<ProviderId, ProviderConfig>,
    fallback_provider: ProviderId,
}

impl Registry {
    /// Start building a registry from scratch (used by fixture tests).
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::empty()
    }

    /// The production registry: full country table, region groups, aliases
    /// and catalogs for every provider.
    #[must_use]
    pub fn with_defaults() -> Self {
        RegistryBuilder::with_defaults().build()
    }

    /// Look up a country record by free-form name, alias, or ISO code.
    #[must_use]
    pub fn find_country(&self, name_or_code: &str) -> Option<&CountryRecord> {
        let norm = normalize_name(name_or_code);
        if let Some(&i) = self.name_index.get(&norm) {
            return Some(&self.countries[i]);
        }
        let upper = name_or_code.trim().to_ascii_uppercase();
        match upper.len() {
            2 => self.iso2_index.get(upper.as_str()).map(|&i| &self.countries[i]),
            3 => self.iso3_index.get(upper.as_str()).map(|&i| &self.countries[i]),
            _ => None,
        }
    }

    /// Fixed, ordered, duplicate-free ISO3 list for a registered region
    /// group, or `None` when the name is not a region.
    #[must_use]
    pub fn region(&self, name: &str) -> Option<&[&'static str]> {
        self.regions
            .get(&normalize_region_key(name))
            .map(Vec::as_slice)
    }

    /// True when the ISO3 code belongs to an EU member state.
    #[must_use]
    pub fn is_eu_member(&self, iso3: &str) -> bool {
        self.eu_members.iter().any(|m| *m == iso3)
    }

    /// The code alphabet a provider expects.
    #[must_use]
    pub fn alphabet(&self, provider: ProviderId) -> CodeAlphabet {
        self.alphabets
            .get(&provider)
            .copied()
            .unwrap_or(CodeAlphabet::Iso3)
    }

    /// Provider-specific fixup for an already-alphabetized code (Eurostat
    /// uses `EL` for Greece and `UK` for the United Kingdom).
    #[must_use]
    pub fn fixup_code<'a>(&self, provider: ProviderId, code: &'a str) -> &'a str {
        self.code_fixups
            .iter()
            .find(|((p, from), _)| *p == provider && *from == code)
            .map_or(code, |(_, to)| to)
    }

    /// Country-code override table for a provider, normalized-name keyed.
    #[must_use]
    pub fn country_override(&self, provider: ProviderId, normalized: &str) -> Option<&str> {
        self.configs
            .get(&provider)
            .and_then(|c| c.country_overrides.get(normalized))
            .map(String::as_str)
    }

    /// Exact/alias indicator lookup for a provider, normalized-phrase keyed.
    /// Per-provider configuration aliases win over the built-in table.
    #[must_use]
    pub fn indicator_alias(&self, provider: ProviderId, normalized: &str) -> Option<&str> {
        if let Some(code) = self
            .configs
            .get(&provider)
            .and_then(|c| c.indicator_aliases.get(normalized))
        {
            return Some(code);
        }
        self.aliases
            .get(&(provider, normalized.to_string()))
            .map(String::as_str)
    }

    /// The provider's searchable indicator catalog.
    #[must_use]
    pub fn catalog(&self, provider: ProviderId) -> &[IndicatorEntry] {
        self.catalogs.get(&provider).map_or(&[], Vec::as_slice)
    }

    /// Single-source indicator pinning: the first pinned keyword contained in
    /// the normalized phrase decides the provider.
    #[must_use]
    pub fn pinned_provider(&self, normalized_phrase: &str) -> Option<ProviderId> {
        self.pinned
            .iter()
            .find(|(kw, _)| normalized_phrase.contains(kw))
            .map(|&(_, p)| p)
    }

    /// Configuration for a provider (limits, TTL, overrides, aliases).
    #[must_use]
    pub fn provider_config(&self, provider: ProviderId) -> ProviderConfig {
        self.configs.get(&provider).cloned().unwrap_or_default()
    }

    /// The configured fallback provider (routing rule of last resort).
    #[must_use]
    pub const fn fallback_provider(&self) -> ProviderId {
        self.fallback_provider
    }

    /// A few valid codes for a provider, used in `UnknownCountry` diagnostics.
    #[must_use]
    pub fn sample_codes(&self, provider: ProviderId) -> Vec<String> {
        let alphabet = self.alphabet(provider);
        self.countries
            .iter()
            .take(3)
            .map(|r| {
                let code = match alphabet {
                    CodeAlphabet::Iso2 => r.iso2,
                    CodeAlphabet::Iso3 => r.iso3,
                };
                self.fixup_code(provider, code).to_string()
            })
            .collect()
    }
}

/// Builder for `Registry`; the defaults ship the full production tables and
/// fixture tests start from `Registry::builder()` instead.
pub struct RegistryBuilder {
    countries: Vec<CountryRecord>,
    extra_names: Vec<(&'static str, &'static str)>, // alias -> iso3
    regions: Vec<(&'static str, Vec<&'static str>)>,
    eu_members: Vec<&'static str>,
    alphabets: HashMap<ProviderId, CodeAlphabet>,
    code_fixups: Vec<((ProviderId, &'static str), &'static str)>,
    aliases: HashMap<(ProviderId, String), String>,
    catalogs: HashMap<ProviderId, Vec<IndicatorEntry>>,
    pinned: Vec<(&'static str, ProviderId)>,
    configs: HashMap<ProviderId, ProviderConfig>,
    fallback_provider: ProviderId,
}

impl RegistryBuilder {
    fn empty() -> Self {
        Self {
            countries: Vec::new(),
            extra_names: Vec::new(),
            regions: Vec::new(),
            eu_members: Vec::new(),
            alphabets: default_alphabets(),
            code_fixups: Vec::new(),
            aliases: HashMap::new(),
            catalogs: HashMap::new(),
            pinned: Vec::new(),
            configs: HashMap::new(),
            fallback_provider: ProviderId::WorldBank,
        }
    }

    fn with_defaults() -> Self {
        let mut b = Self::empty();
        b.countries = tables::COUNTRIES
            .iter()
            .map(|&(name, iso2, iso3)| CountryRecord { name, iso2, iso3 })
            .collect();
        b.extra_names = tables::NAME_ALIASES.to_vec();
        b.regions = tables::REGIONS
            .iter()
            .map(|&(k, v)| (k, v.to_vec()))
            .collect();
        b.eu_members = tables::EU_MEMBERS.to_vec();
        b.code_fixups = tables::CODE_FIXUPS.to_vec();
        for &(provider, phrase, code) in tables::INDICATOR_ALIASES {
            b.aliases
                .insert((provider, normalize_name(phrase)), code.to_string());
        }
        for &(provider, catalog) in tables::CATALOGS {
            b.catalogs.insert(
                provider,
                catalog
                    .iter()
                    .map(|&(code, name, keywords)| IndicatorEntry {
                        code,
                        name,
                        keywords,
                    })
                    .collect(),
            );
        }
        b.pinned = tables::PINNED.to_vec();
        b.configs = default_configs();
        b
    }

    /// Add a country record.
    #[must_use]
    pub fn country(mut self, name: &'static str, iso2: &'static str, iso3: &'static str) -> Self {
        self.countries.push(CountryRecord { name, iso2, iso3 });
        self
    }

    /// Register a region group with an ordered ISO3 member list.
    #[must_use]
    pub fn region(mut self, key: &'static str, members: Vec<&'static str>) -> Self {
        self.regions.push((key, members));
        self
    }

    /// Mark ISO3 codes as EU members (router country-default rule).
    #[must_use]
    pub fn eu_members(mut self, members: Vec<&'static str>) -> Self {
        self.eu_members = members;
        self
    }

    /// Add an indicator alias for a provider.
    #[must_use]
    pub fn indicator_alias(mut self, provider: ProviderId, phrase: &str, code: &str) -> Self {
        self.aliases
            .insert((provider, normalize_name(phrase)), code.to_string());
        self
    }

    /// Replace a provider's configuration.
    #[must_use]
    pub fn provider_config(mut self, provider: ProviderId, config: ProviderConfig) -> Self {
        self.configs.insert(provider, config);
        self
    }

    /// Set the fallback provider for the routing rule of last resort.
    #[must_use]
    pub const fn fallback_provider(mut self, provider: ProviderId) -> Self {
        self.fallback_provider = provider;
        self
    }

    /// Finish: build indexes and freeze the tables.
    #[must_use]
    pub fn build(self) -> Registry {
        let mut name_index = HashMap::new();
        let mut iso2_index = HashMap::new();
        let mut iso3_index = HashMap::new();
        for (i, rec) in self.countries.iter().enumerate() {
            name_index.insert(normalize_name(rec.name), i);
            iso2_index.insert(rec.iso2, i);
            iso3_index.insert(rec.iso3, i);
        }
        for (alias, iso3) in &self.extra_names {
            if let Some(&i) = iso3_index.get(iso3) {
                name_index.insert(normalize_name(alias), i);
            }
        }

        // Deduplicate region members preserving first-seen order.
        let mut regions = HashMap::new();
        for (key, members) in self.regions {
            let mut seen = Vec::with_capacity(members.len());
            for m in members {
                if !seen.contains(&m) {
                    seen.push(m);
                }
            }
            regions.insert(normalize_region_key(key), seen);
        }

        Registry {
            countries: self.countries,
            name_index,
            iso2_index,
            iso3_index,
            regions,
            eu_members: self.eu_members,
            alphabets: self.alphabets,
            code_fixups: self.code_fixups,
            aliases: self.aliases,
            catalogs: self.catalogs,
            pinned: self.pinned,
            configs: self.configs,
            fallback_provider: self.fallback_provider,
        }
    }
}

fn default_alphabets() -> HashMap<ProviderId, CodeAlphabet> {
    HashMap::from([
        (ProviderId::WorldBank, CodeAlphabet::Iso3),
        (ProviderId::Eurostat, CodeAlphabet::Iso2),
        (ProviderId::Oecd, CodeAlphabet::Iso3),
        (ProviderId::Imf, CodeAlphabet::Iso2),
    ])
}

fn default_configs() -> HashMap<ProviderId, ProviderConfig> {
    let mut out = HashMap::new();
    // Annual macro series change rarely; market-facing providers get shorter
    // TTLs and tighter admission budgets.
    out.insert(
        ProviderId::WorldBank,
        ProviderConfig {
            limits: RateLimitConfig {
                min_delay: Duration::from_millis(200),
                max_per_minute: 60,
                max_per_hour: 1000,
            },
            cache_ttl: Duration::from_secs(24 * 3600),
            ..ProviderConfig::default()
        },
    );
    out.insert(
        ProviderId::Eurostat,
        ProviderConfig {
            limits: RateLimitConfig {
                min_delay: Duration::from_millis(500),
                max_per_minute: 30,
                max_per_hour: 600,
            },
            cache_ttl: Duration::from_secs(6 * 3600),
            ..ProviderConfig::default()
        },
    );
    out.insert(
        ProviderId::Oecd,
        ProviderConfig {
            limits: RateLimitConfig {
                min_delay: Duration::from_millis(500),
                max_per_minute: 20,
                max_per_hour: 400,
            },
            cache_ttl: Duration::from_secs(6 * 3600),
            ..ProviderConfig::default()
        },
    );
    out.insert(
        ProviderId::Imf,
        ProviderConfig {
            limits: RateLimitConfig {
                min_delay: Duration::from_secs(1),
                max_per_minute: 10,
                max_per_hour: 300,
            },
            cache_ttl: Duration::from_secs(12 * 3600),
            ..ProviderConfig::default()
        },
    );
    out
}

mod tables {
    use oikos_types::ProviderId;

    pub const COUNTRIES: &[(&str, &str, &str)] = &[
        ("Austria", "AT", "AUT"),
        ("Belgium", "BE", "BEL"),
        ("Bulgaria", "BG", "BGR"),
        ("Croatia", "HR", "HRV"),
        ("Cyprus", "CY", "CYP"),
        ("Czechia", "CZ", "CZE"),
        ("Denmark", "DK", "DNK"),
        ("Estonia", "EE", "EST"),
        ("Finland", "FI", "FIN"),
        ("France", "FR", "FRA"),
        ("Germany", "DE", "DEU"),
        ("Greece", "GR", "GRC"),
        ("Hungary", "HU", "HUN"),
        ("Ireland", "IE", "IRL"),
        ("Italy", "IT", "ITA"),
        ("Latvia", "LV", "LVA"),
        ("Lithuania", "LT", "LTU"),
        ("Luxembourg", "LU", "LUX"),
        ("Malta", "MT", "MLT"),
        ("Netherlands", "NL", "NLD"),
        ("Poland", "PL", "POL"),
        ("Portugal", "PT", "PRT"),
        ("Romania", "RO", "ROU"),
        ("Slovakia", "SK", "SVK"),
        ("Slovenia", "SI", "SVN"),
        ("Spain", "ES", "ESP"),
        ("Sweden", "SE", "SWE"),
        ("United Kingdom", "GB", "GBR"),
        ("United States", "US", "USA"),
        ("Canada", "CA", "CAN"),
        ("Japan", "JP", "JPN"),
        ("China", "CN", "CHN"),
        ("India", "IN", "IND"),
        ("Indonesia", "ID", "IDN"),
        ("South Korea", "KR", "KOR"),
        ("Mexico", "MX", "MEX"),
        ("Russia", "RU", "RUS"),
        ("Saudi Arabia", "SA", "SAU"),
        ("South Africa", "ZA", "ZAF"),
        ("Turkey", "TR", "TUR"),
        ("Argentina", "AR", "ARG"),
        ("Australia", "AU", "AUS"),
        ("Brazil", "BR", "BRA"),
        ("Switzerland", "CH", "CHE"),
        ("Norway", "NO", "NOR"),
        ("Iceland", "IS", "ISL"),
        ("New Zealand", "NZ", "NZL"),
        ("Singapore", "SG", "SGP"),
        ("Malaysia", "MY", "MYS"),
        ("Philippines", "PH", "PHL"),
        ("Thailand", "TH", "THA"),
        ("Vietnam", "VN", "VNM"),
    ];

    pub const NAME_ALIASES: &[(&str, &str)] = &[
        ("USA", "USA"),
        ("US", "USA"),
        ("America", "USA"),
        ("United States of America", "USA"),
        ("UK", "GBR"),
        ("Britain", "GBR"),
        ("Great Britain", "GBR"),
        ("England", "GBR"),
        ("Korea", "KOR"),
        ("Republic of Korea", "KOR"),
        ("Czech Republic", "CZE"),
        ("Holland", "NLD"),
        ("Russian Federation", "RUS"),
        ("Turkiye", "TUR"),
        ("Viet Nam", "VNM"),
    ];

    pub const EU_MEMBERS: &[&str] = &[
        "AUT", "BEL", "BGR", "HRV", "CYP", "CZE", "DNK", "EST", "FIN", "FRA", "DEU", "GRC", "HUN",
        "IRL", "ITA", "LVA", "LTU", "LUX", "MLT", "NLD", "POL", "PRT", "ROU", "SVK", "SVN", "ESP",
        "SWE",
    ];

    pub const EUROZONE: &[&str] = &[
        "AUT", "BEL", "HRV", "CYP", "EST", "FIN", "FRA", "DEU", "GRC", "IRL", "ITA", "LVA", "LTU",
        "LUX", "MLT", "NLD", "PRT", "SVK", "SVN", "ESP",
    ];

    pub const G7: &[&str] = &["CAN", "FRA", "DEU", "ITA", "JPN", "GBR", "USA"];

    pub const G20: &[&str] = &[
        "ARG", "AUS", "BRA", "CAN", "CHN", "FRA", "DEU", "IND", "IDN", "ITA", "JPN", "KOR", "MEX",
        "RUS", "SAU", "ZAF", "TUR", "GBR", "USA",
    ];

    pub const BRICS: &[&str] = &["BRA", "RUS", "IND", "CHN", "ZAF"];

    pub const NORDICS: &[&str] = &["DNK", "FIN", "ISL", "NOR", "SWE"];

    pub const ASEAN5: &[&str] = &["IDN", "MYS", "PHL", "SGP", "THA"];

    pub const DEVELOPED: &[&str] = &[
        "USA", "CAN", "GBR", "DEU", "FRA", "ITA", "ESP", "NLD", "CHE", "SWE", "NOR", "DNK", "FIN",
        "AUT", "BEL", "IRL", "JPN", "KOR", "AUS", "NZL", "SGP",
    ];

    pub const ASIAN: &[&str] = &[
        "CHN", "JPN", "IND", "KOR", "IDN", "THA", "MYS", "PHL", "SGP", "VNM",
    ];

    pub const REGIONS: &[(&str, &[&str])] = &[
        ("EUROZONE", EUROZONE),
        ("EURO AREA", EUROZONE),
        ("EU", EU_MEMBERS),
        ("EUROPEAN UNION", EU_MEMBERS),
        ("G7", G7),
        ("G20", G20),
        ("BRICS", BRICS),
        ("NORDICS", NORDICS),
        ("NORDIC COUNTRIES", NORDICS),
        ("ASEAN", ASEAN5),
        ("DEVELOPED ECONOMIES", DEVELOPED),
        ("ADVANCED ECONOMIES", DEVELOPED),
        ("ASIAN COUNTRIES", ASIAN),
        ("ASIA", ASIAN),
    ];

    pub const CODE_FIXUPS: &[((ProviderId, &str), &str)] = &[
        ((ProviderId::Eurostat, "GR"), "EL"),
        ((ProviderId::Eurostat, "GB"), "UK"),
    ];

    pub const INDICATOR_ALIASES: &[(ProviderId, &str, &str)] = &[
        (ProviderId::WorldBank, "unemployment rate", "SL.UEM.TOTL.ZS"),
        (ProviderId::WorldBank, "unemployment", "SL.UEM.TOTL.ZS"),
        (ProviderId::WorldBank, "gdp", "NY.GDP.MKTP.CD"),
        (ProviderId::WorldBank, "gross domestic product", "NY.GDP.MKTP.CD"),
        (ProviderId::WorldBank, "gdp growth", "NY.GDP.MKTP.KD.ZG"),
        (ProviderId::WorldBank, "gdp per capita", "NY.GDP.PCAP.CD"),
        (ProviderId::WorldBank, "inflation", "FP.CPI.TOTL.ZG"),
        (ProviderId::WorldBank, "inflation rate", "FP.CPI.TOTL.ZG"),
        (ProviderId::WorldBank, "cpi", "FP.CPI.TOTL.ZG"),
        (ProviderId::WorldBank, "population", "SP.POP.TOTL"),
        (ProviderId::WorldBank, "government debt", "GC.DOD.TOTL.GD.ZS"),
        (ProviderId::WorldBank, "current account", "BN.CAB.XOKA.GD.ZS"),
        (ProviderId::Eurostat, "unemployment rate", "une_rt_m"),
        (ProviderId::Eurostat, "unemployment", "une_rt_m"),
        (ProviderId::Eurostat, "gdp", "namq_10_gdp"),
        (ProviderId::Eurostat, "gross domestic product", "namq_10_gdp"),
        (ProviderId::Eurostat, "inflation", "prc_hicp_manr"),
        (ProviderId::Eurostat, "inflation rate", "prc_hicp_manr"),
        (ProviderId::Eurostat, "hicp", "prc_hicp_manr"),
        (ProviderId::Eurostat, "population", "demo_pjan"),
        (ProviderId::Eurostat, "government debt", "gov_10dd_edpt1"),
        (ProviderId::Oecd, "unemployment rate", "HUR"),
        (ProviderId::Oecd, "unemployment", "HUR"),
        (ProviderId::Oecd, "gdp", "GDP"),
        (ProviderId::Oecd, "inflation", "CPI"),
        (ProviderId::Oecd, "inflation rate", "CPI"),
        (ProviderId::Oecd, "composite leading indicator", "CLI"),
        (ProviderId::Imf, "unemployment rate", "LUR"),
        (ProviderId::Imf, "unemployment", "LUR"),
        (ProviderId::Imf, "gdp", "NGDPD"),
        (ProviderId::Imf, "inflation", "PCPIPCH"),
        (ProviderId::Imf, "inflation rate", "PCPIPCH"),
        (ProviderId::Imf, "population", "LP"),
    ];

    pub const WORLDBANK_CATALOG: &[(&str, &str, &[&str])] = &[
        ("SL.UEM.TOTL.ZS", "Unemployment, total (% of total labor force)", &["unemployment", "labor", "force", "jobless", "rate"]),
        ("NY.GDP.MKTP.CD", "GDP (current US$)", &["gdp", "gross", "domestic", "product", "economy", "output"]),
        ("NY.GDP.MKTP.KD.ZG", "GDP growth (annual %)", &["gdp", "growth", "annual", "economic"]),
        ("NY.GDP.PCAP.CD", "GDP per capita (current US$)", &["gdp", "per", "capita", "income"]),
        ("FP.CPI.TOTL.ZG", "Inflation, consumer prices (annual %)", &["inflation", "consumer", "prices", "cpi"]),
        ("SP.POP.TOTL", "Population, total", &["population", "people", "inhabitants"]),
        ("GC.DOD.TOTL.GD.ZS", "Central government debt, total (% of GDP)", &["government", "debt", "public", "gdp"]),
        ("BN.CAB.XOKA.GD.ZS", "Current account balance (% of GDP)", &["current", "account", "balance", "trade"]),
        ("SL.TLF.CACT.ZS", "Labor force participation rate", &["labor", "force", "participation", "employment"]),
        ("NE.EXP.GNFS.ZS", "Exports of goods and services (% of GDP)", &["exports", "goods", "services", "trade"]),
    ];

    pub const EUROSTAT_CATALOG: &[(&str, &str, &[&str])] = &[
        ("une_rt_m", "Unemployment by sex and age - monthly data", &["unemployment", "monthly", "jobless", "rate"]),
        ("namq_10_gdp", "GDP and main components", &["gdp", "gross", "domestic", "product", "quarterly"]),
        ("prc_hicp_manr", "HICP - monthly annual rate of change", &["hicp", "inflation", "prices", "harmonised", "consumer"]),
        ("demo_pjan", "Population on 1 January", &["population", "demography", "inhabitants"]),
        ("gov_10dd_edpt1", "Government deficit and debt", &["government", "debt", "deficit", "edp"]),
        ("ext_lt_intertrd", "International trade - long term", &["trade", "exports", "imports", "international"]),
    ];

    pub const OECD_CATALOG: &[(&str, &str, &[&str])] = &[
        ("HUR", "Harmonised unemployment rate", &["unemployment", "harmonised", "rate", "jobless"]),
        ("GDP", "Gross domestic product", &["gdp", "gross", "domestic", "product"]),
        ("CPI", "Inflation (CPI)", &["inflation", "cpi", "consumer", "prices"]),
        ("CLI", "Composite leading indicator", &["composite", "leading", "indicator", "cycle"]),
        ("HHDI", "Household disposable income", &["household", "disposable", "income"]),
    ];

    pub const IMF_CATALOG: &[(&str, &str, &[&str])] = &[
        ("LUR", "Unemployment rate", &["unemployment", "rate", "jobless"]),
        ("NGDPD", "GDP, current prices (USD)", &["gdp", "gross", "domestic", "product"]),
        ("PCPIPCH", "Inflation, average consumer prices", &["inflation", "consumer", "prices", "cpi"]),
        ("LP", "Population", &["population", "people"]),
        ("GGXWDG_NGDP", "General government gross debt (% of GDP)", &["government", "debt", "gross", "gdp"]),
    ];

    pub const CATALOGS: &[(ProviderId, &[(&str, &str, &[&str])])] = &[
        (ProviderId::WorldBank, WORLDBANK_CATALOG),
        (ProviderId::Eurostat, EUROSTAT_CATALOG),
        (ProviderId::Oecd, OECD_CATALOG),
        (ProviderId::Imf, IMF_CATALOG),
    ];

    // Indicator families available from exactly one provider. Keys are
    // substrings matched against the normalized phrase.
    pub const PINNED: &[(&str, ProviderId)] = &[
        ("hicp", ProviderId::Eurostat),
        ("harmonised index of consumer prices", ProviderId::Eurostat),
        ("composite leading indicator", ProviderId::Oecd),
    ];
}
