//! Quantity formatter
//!
//! Serves formatter and parser specs per quantity type and measurement
//! system. Specs are built on first request from the override for the type
//! when one is installed, else from the built-in default, else by a
//! registered provider, and cached until an override change evicts them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use quantity_core::{QuantityError, QuantityResult};
use quantity_format::{Format, FormatProps, Formatter, FormatterSpec, ParseResult, Parser, ParserSpec};
use quantity_units::{BasicUnitsProvider, UnitConversionSpec, UnitProps, UnitsProvider};
use crate::cache::{SpecCache, SpecPair};
use crate::defaults::default_format;
use crate::{FormatterParserSpecsProvider, OverrideFormatEntry, QuantityType};

pub struct QuantityFormatter {
    units: Arc<dyn UnitsProvider>,
    use_imperial: AtomicBool,
    overrides: RwLock<HashMap<QuantityType, OverrideFormatEntry>>,
    providers: RwLock<HashMap<String, Arc<dyn FormatterParserSpecsProvider>>>,
    cache: SpecCache,
}

impl QuantityFormatter {
    pub fn new(units: Arc<dyn UnitsProvider>) -> Self {
        Self {
            units,
            use_imperial: AtomicBool::new(false),
            overrides: RwLock::new(HashMap::new()),
            providers: RwLock::new(HashMap::new()),
            cache: SpecCache::new(),
        }
    }

    /// Formatter backed by the built-in unit registry
    pub fn with_basic_units() -> Self {
        Self::new(Arc::new(BasicUnitsProvider::new()))
    }

    /// Builder: start with imperial as the active system
    pub fn with_imperial(self, use_imperial: bool) -> Self {
        self.set_use_imperial_formats(use_imperial);
        self
    }

    pub fn units_provider(&self) -> &Arc<dyn UnitsProvider> {
        &self.units
    }

    /// Active measurement system
    pub fn use_imperial_formats(&self) -> bool {
        self.use_imperial.load(Ordering::Acquire)
    }

    pub fn set_use_imperial_formats(&self, use_imperial: bool) {
        self.use_imperial.store(use_imperial, Ordering::Release);
    }

    /// Build every known type's specs for `use_imperial`. The active system
    /// is left alone.
    pub async fn load_format_and_parsing_maps(&self, use_imperial: bool) -> QuantityResult<()> {
        let mut types: Vec<QuantityType> = QuantityType::BUILT_IN.to_vec();
        types.extend(self.registered_types());
        for quantity_type in &types {
            self.specs(quantity_type, use_imperial).await?;
        }
        info!(use_imperial, count = types.len(), "format and parsing maps loaded");
        Ok(())
    }

    pub async fn get_formatter_spec_by_quantity_type(&self, quantity_type: &QuantityType, use_imperial: bool) -> QuantityResult<Arc<FormatterSpec>> {
        Ok(self.specs(quantity_type, use_imperial).await?.formatter)
    }

    pub async fn get_parser_spec_by_quantity_type(&self, quantity_type: &QuantityType, use_imperial: bool) -> QuantityResult<Arc<ParserSpec>> {
        Ok(self.specs(quantity_type, use_imperial).await?.parser)
    }

    /// Formatter spec for the active system
    pub async fn get_active_formatter_spec(&self, quantity_type: &QuantityType) -> QuantityResult<Arc<FormatterSpec>> {
        self.get_formatter_spec_by_quantity_type(quantity_type, self.use_imperial_formats()).await
    }

    /// Parser spec for the active system
    pub async fn get_active_parser_spec(&self, quantity_type: &QuantityType) -> QuantityResult<Arc<ParserSpec>> {
        self.get_parser_spec_by_quantity_type(quantity_type, self.use_imperial_formats()).await
    }

    /// Cached formatter spec; fails with `FormatterNotFound` when none has been built
    pub fn find_formatter_spec_by_quantity_type(&self, quantity_type: &QuantityType, use_imperial: bool) -> QuantityResult<Arc<FormatterSpec>> {
        self.cache
            .get(quantity_type, use_imperial)
            .map(|pair| pair.formatter)
            .ok_or_else(|| QuantityError::FormatterNotFound(quantity_type.to_string()))
    }

    /// Cached parser spec; fails with `ParserNotFound` when none has been built
    pub fn find_parser_spec_by_quantity_type(&self, quantity_type: &QuantityType, use_imperial: bool) -> QuantityResult<Arc<ParserSpec>> {
        self.cache
            .get(quantity_type, use_imperial)
            .map(|pair| pair.parser)
            .ok_or_else(|| QuantityError::ParserNotFound(quantity_type.to_string()))
    }

    /// True once a spec pair for the key has been built and cached
    pub fn is_cached(&self, quantity_type: &QuantityType, use_imperial: bool) -> bool {
        self.cache.is_ready(quantity_type, use_imperial)
    }

    pub fn format_quantity(&self, magnitude: f64, spec: &FormatterSpec) -> String {
        Formatter::format_quantity(magnitude, spec)
    }

    pub fn parse_into_quantity_value(&self, text: &str, spec: &ParserSpec) -> ParseResult {
        Parser::parse_into_quantity_value(text, spec)
    }

    /// Validate and install replacement formats for a type
    pub async fn set_override_formats(&self, quantity_type: &QuantityType, entry: OverrideFormatEntry) -> QuantityResult<()> {
        let persistence = self.units.find_unit_by_name(&self.persistence_unit_name(quantity_type)?).await?;
        for (props, use_imperial) in [(&entry.metric, false), (&entry.imperial, true)] {
            if let Some(props) = props {
                let name = spec_name(quantity_type, use_imperial);
                build_from_props(self.units.as_ref(), &name, props, &persistence).await?;
            }
        }

        self.overrides.write().insert(quantity_type.clone(), entry);
        self.cache.evict(quantity_type);
        info!(quantity_type = %quantity_type, "override formats installed");
        Ok(())
    }

    pub fn clear_override_formats(&self, quantity_type: &QuantityType) {
        let removed = self.overrides.write().remove(quantity_type).is_some();
        if removed {
            self.cache.evict(quantity_type);
            info!(quantity_type = %quantity_type, "override formats cleared");
        }
    }

    pub fn clear_all_override_formats(&self) {
        let cleared: Vec<QuantityType> = self.overrides.write().drain().map(|(t, _)| t).collect();
        for quantity_type in &cleared {
            self.cache.evict(quantity_type);
        }
        info!(count = cleared.len(), "all override formats cleared");
    }

    pub fn get_override_formats(&self, quantity_type: &QuantityType) -> Option<OverrideFormatEntry> {
        self.overrides.read().get(quantity_type).cloned()
    }

    /// Register a custom quantity type. Returns false when the name is taken,
    /// by a built-in type or an earlier registration.
    pub fn register_formatter_parser_specs_provider(&self, provider: Arc<dyn FormatterParserSpecsProvider>) -> bool {
        let name = provider.quantity_type_name().to_string();
        if QuantityType::built_in(&name).is_some() {
            warn!(name = %name, "rejected specs provider: built-in quantity type");
            return false;
        }

        let mut providers = self.providers.write();
        if providers.contains_key(&name) {
            warn!(name = %name, "rejected specs provider: already registered");
            return false;
        }
        providers.insert(name.clone(), provider);
        drop(providers);

        self.cache.evict(&QuantityType::Custom(name.clone()));
        info!(name = %name, "specs provider registered");
        true
    }

    pub fn registered_types(&self) -> Vec<QuantityType> {
        let mut names: Vec<String> = self.providers.read().keys().cloned().collect();
        names.sort();
        names.into_iter().map(QuantityType::Custom).collect()
    }

    pub async fn find_unit_by_name(&self, name: &str) -> QuantityResult<UnitProps> {
        self.units.find_unit_by_name(name).await
    }

    /// Conversions from every unit of `unit`'s phenomenon into `unit`
    pub async fn create_unit_conversion_specs_for_unit(&self, unit: &UnitProps) -> QuantityResult<Vec<UnitConversionSpec>> {
        quantity_units::create_unit_conversion_specs_for_unit(self.units.as_ref(), unit).await
    }

    async fn specs(&self, quantity_type: &QuantityType, use_imperial: bool) -> QuantityResult<SpecPair> {
        self.cache
            .get_or_build(quantity_type, use_imperial, || {
                let source = self.spec_source(quantity_type, use_imperial)?;
                let units = Arc::clone(&self.units);
                Ok(build_specs(units, spec_name(quantity_type, use_imperial), source, use_imperial))
            })
            .await
    }

    fn provider(&self, quantity_type: &QuantityType) -> Option<Arc<dyn FormatterParserSpecsProvider>> {
        match quantity_type {
            QuantityType::Custom(name) => self.providers.read().get(name).cloned(),
            _ => None,
        }
    }

    fn persistence_unit_name(&self, quantity_type: &QuantityType) -> QuantityResult<String> {
        if let Some(name) = quantity_type.persistence_unit_name() {
            return Ok(name.to_string());
        }

        let provider = self
            .provider(quantity_type)
            .ok_or_else(|| QuantityError::UnknownQuantityType(quantity_type.to_string()))?;
        provider.persistence_unit_name().map(str::to_string).ok_or_else(|| {
            QuantityError::invalid_format(format!(
                "quantity type {} does not accept override formats",
                quantity_type
            ))
        })
    }

    /// Where a type's specs come from: override, then built-in default, then
    /// a registered provider
    fn spec_source(&self, quantity_type: &QuantityType, use_imperial: bool) -> QuantityResult<SpecSource> {
        let props = self
            .overrides
            .read()
            .get(quantity_type)
            .and_then(|entry| entry.for_system(use_imperial).cloned())
            .or_else(|| default_format(quantity_type, use_imperial));

        if let Some(props) = props {
            let persistence_unit = self.persistence_unit_name(quantity_type)?;
            return Ok(SpecSource::Props { props, persistence_unit });
        }

        self.provider(quantity_type)
            .map(SpecSource::Provider)
            .ok_or_else(|| QuantityError::UnknownQuantityType(quantity_type.to_string()))
    }
}

enum SpecSource {
    Props { props: FormatProps, persistence_unit: String },
    Provider(Arc<dyn FormatterParserSpecsProvider>),
}

fn spec_name(quantity_type: &QuantityType, use_imperial: bool) -> String {
    format!("{}.{}", quantity_type, if use_imperial { "imperial" } else { "metric" })
}

async fn build_specs(units: Arc<dyn UnitsProvider>, name: String, source: SpecSource, use_imperial: bool) -> QuantityResult<SpecPair> {
    debug!(spec = %name, "building specs");
    match source {
        SpecSource::Props { props, persistence_unit } => {
            let persistence = units.find_unit_by_name(&persistence_unit).await?;
            build_from_props(units.as_ref(), &name, &props, &persistence).await
        }
        SpecSource::Provider(provider) => {
            let formatter = provider.create_formatter_spec(units.as_ref(), use_imperial).await?;
            let parser = provider.create_parser_spec(units.as_ref(), use_imperial).await?;
            Ok(SpecPair {
                formatter: Arc::new(formatter),
                parser: Arc::new(parser),
            })
        }
    }
}

async fn build_from_props(units: &dyn UnitsProvider, name: &str, props: &FormatProps, persistence: &UnitProps) -> QuantityResult<SpecPair> {
    let format = Format::from_props(name, props, units).await?;
    let formatter = FormatterSpec::create(name, format.clone(), units, persistence).await?;
    let parser = ParserSpec::create(format, units, persistence).await?;
    Ok(SpecPair {
        formatter: Arc::new(formatter),
        parser: Arc::new(parser),
    })
}

impl Default for QuantityFormatter {
    fn default() -> Self {
        Self::with_basic_units()
    }
}
