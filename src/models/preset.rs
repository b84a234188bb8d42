use serde::Deserialize;
use smile_filters::{AdjustmentParameters, ParamError};
use std::collections::BTreeMap;

/// A preset as written in config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PresetConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Percentages keyed by adjustment id; all five must be present
    pub values: BTreeMap<String, i64>,
}

impl PresetConfig {
    /// The four presets shipped with the application.
    pub fn builtin() -> Vec<Self> {
        let builtin: [(&str, &str, [i64; 5]); 4] = [
            ("Natural Smile", "Subtle, natural enhancements", [30, 20, 15, 10, 25]),
            ("Hollywood Smile", "Dramatic, bright transformation", [100, 100, 80, 60, 90]),
            ("Youthful Smile", "Playful, youthful appearance", [60, 40, 60, 70, 60]),
            ("Professional Smile", "Conservative, polished look", [50, 60, 30, 40, 45]),
        ];
        builtin
            .into_iter()
            .map(|(name, description, values)| Self {
                name: name.to_string(),
                description: description.to_string(),
                values: smile_filters::AdjustmentId::ALL
                    .iter()
                    .zip(values)
                    .map(|(id, v)| (id.as_str().to_string(), v))
                    .collect(),
            })
            .collect()
    }
}

/// A validated, named parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    /// URL-friendly form of the name, e.g. `hollywood-smile`
    pub slug: String,
    pub description: String,
    pub params: AdjustmentParameters,
}

/// Ordered collection of presets with name/slug lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Validate preset definitions. Each must set all five adjustments
    /// within range.
    pub fn from_config(configs: &[PresetConfig]) -> Result<Self, ParamError> {
        let presets = configs
            .iter()
            .map(|c| {
                Ok(Preset {
                    name: c.name.clone(),
                    slug: slugify(&c.name),
                    description: c.description.clone(),
                    params: AdjustmentParameters::from_pairs(
                        c.values.iter().map(|(k, v)| (k.as_str(), *v)),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, ParamError>>()?;
        Ok(Self { presets })
    }

    pub fn builtin() -> Self {
        Self::from_config(&PresetConfig::builtin()).unwrap_or_default()
    }

    /// Find a preset by display name or slug, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Preset> {
        let wanted = name.trim();
        let wanted_slug = slugify(wanted);
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted) || p.slug == wanted_slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smile_filters::AdjustmentId;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hollywood Smile"), "hollywood-smile");
        assert_eq!(slugify("  Natural   Smile! "), "natural-smile");
        assert_eq!(slugify("Pro/Smile 2"), "pro-smile-2");
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.len(), 4);

        let names: Vec<_> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Natural Smile",
                "Hollywood Smile",
                "Youthful Smile",
                "Professional Smile"
            ]
        );

        let hollywood = catalog.find("Hollywood Smile").unwrap();
        assert_eq!(hollywood.params.whitening(), 100);
        assert_eq!(hollywood.params.alignment(), 100);
        assert_eq!(hollywood.params.gum(), 80);
        assert_eq!(hollywood.params.tooth_shape(), 60);
        assert_eq!(hollywood.params.brightness(), 90);
    }

    #[test]
    fn test_find_by_name_or_slug() {
        let catalog = PresetCatalog::builtin();

        assert_eq!(catalog.find("natural smile").unwrap().slug, "natural-smile");
        assert_eq!(
            catalog.find("PROFESSIONAL-SMILE").unwrap().name,
            "Professional Smile"
        );
        assert_eq!(
            catalog.find("youthful-smile").unwrap().params.get(AdjustmentId::ToothShape),
            70
        );
        assert!(catalog.find("sparkly").is_none());
    }

    #[test]
    fn test_from_config_requires_every_adjustment() {
        let mut config = PresetConfig::builtin();
        config[0].values.remove("gum");

        assert_eq!(
            PresetCatalog::from_config(&config),
            Err(ParamError::MissingAdjustment(AdjustmentId::Gum))
        );
    }

    #[test]
    fn test_from_config_rejects_unknown_keys() {
        let mut config = PresetConfig::builtin();
        config[1].values.insert("sparkle".into(), 10);

        assert_eq!(
            PresetCatalog::from_config(&config),
            Err(ParamError::UnknownAdjustment("sparkle".into()))
        );
    }
}
