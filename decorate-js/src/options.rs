use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Whether decorator contexts carry a `metadata` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum MetadataMode {
  Enabled,
  Disabled,
  /// The `_metadata` slot is reserved and passed to decorators, but no object is created for it.
  #[default]
  Unset,
}

impl<'de> Deserialize<'de> for MetadataMode {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match Option::<bool>::deserialize(deserializer)? {
      Some(true) => MetadataMode::Enabled,
      Some(false) => MetadataMode::Disabled,
      None => MetadataMode::Unset,
    })
  }
}

/// How helper imports are added to the program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HelperImportStrategy {
  /// Each newly needed helper gets its own import, prepended as soon as it is first requested.
  Eager,
  /// Helpers are collected while the unit is transformed and imported by one statement at the end.
  #[default]
  Deferred,
}

/// Where legacy member `__decorate` calls go relative to the class binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EmissionOrder {
  #[default]
  AfterDeclaration,
  BeforeDeclaration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Pipeline {
  Legacy,
  ImportDeferredLegacy,
  Stage3,
}

impl Pipeline {
  pub fn is_legacy(self) -> bool {
    !matches!(self, Pipeline::Stage3)
  }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecorateOptions {
  /// Selects the legacy `__decorate` lowering instead of Stage-3 `__esDecorate`.
  pub experimental_decorators: bool,
  /// Installs class metadata by assignment instead of `Object.defineProperty`.
  pub loose: bool,
  pub metadata: MetadataMode,
  /// Installs Stage-3 decorated fields with `Object.defineProperty` instead of assignment.
  pub use_define_for_class_fields: bool,
  pub helper_imports: HelperImportStrategy,
  pub emission_order: EmissionOrder,
  pub helper_module: String,
}

impl Default for DecorateOptions {
  fn default() -> Self {
    Self {
      experimental_decorators: false,
      loose: false,
      metadata: MetadataMode::Unset,
      use_define_for_class_fields: true,
      helper_imports: HelperImportStrategy::Deferred,
      emission_order: EmissionOrder::AfterDeclaration,
      helper_module: "tslib".to_string(),
    }
  }
}

impl DecorateOptions {
  pub fn legacy() -> Self {
    Self {
      experimental_decorators: true,
      ..Self::default()
    }
  }

  pub fn stage3() -> Self {
    Self::default()
  }

  pub fn pipeline(&self) -> Pipeline {
    match (self.experimental_decorators, self.helper_imports) {
      (false, _) => Pipeline::Stage3,
      (true, HelperImportStrategy::Eager) => Pipeline::Legacy,
      (true, HelperImportStrategy::Deferred) => Pipeline::ImportDeferredLegacy,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_camel_case_with_defaults() {
    let opts: DecorateOptions = serde_json::from_str(
      r#"{"experimentalDecorators": true, "helperImports": "eager", "unknownOption": 1}"#,
    )
    .unwrap();
    assert_eq!(opts.pipeline(), Pipeline::Legacy);
    assert_eq!(opts.metadata, MetadataMode::Unset);
    assert!(opts.use_define_for_class_fields);
    assert_eq!(opts.helper_module, "tslib");
    assert_eq!(opts.emission_order, EmissionOrder::AfterDeclaration);
  }

  #[test]
  fn metadata_maps_booleans_and_absence() {
    let enabled: DecorateOptions = serde_json::from_str(r#"{"metadata": true}"#).unwrap();
    let disabled: DecorateOptions = serde_json::from_str(r#"{"metadata": false}"#).unwrap();
    let unset: DecorateOptions = serde_json::from_str(r#"{"metadata": null}"#).unwrap();
    assert_eq!(enabled.metadata, MetadataMode::Enabled);
    assert_eq!(disabled.metadata, MetadataMode::Disabled);
    assert_eq!(unset.metadata, MetadataMode::Unset);
  }

  #[test]
  fn resolves_pipelines() {
    assert_eq!(DecorateOptions::stage3().pipeline(), Pipeline::Stage3);
    assert_eq!(DecorateOptions::legacy().pipeline(), Pipeline::ImportDeferredLegacy);
    assert!(Pipeline::Legacy.is_legacy());
    assert!(!Pipeline::Stage3.is_legacy());
  }
}
