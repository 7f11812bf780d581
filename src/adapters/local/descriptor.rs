//! Connection descriptor for the local catalog engine
//!
//! A descriptor is a TOML file holding the connection properties of a source
//! geodatabase and the catalog of feature classes it serves:
//!
//! ```toml
//! [connection]
//! server = "gis-db01"
//! instance = "sde:oracle11g"
//! user = "gis"
//! password = "${GDB_PASSWORD}"
//! version = "SDE.DEFAULT"
//!
//! [[feature_classes]]
//! name = "T.TAB1"
//! geometry_type = "polygon"
//! spatial_reference = "EPSG:4326"
//!
//! [[feature_classes.fields]]
//! name = "OBJECTID"
//! type = "oid"
//!
//! [[feature_classes.fields]]
//! name = "SHAPE"
//! type = "geometry"
//!
//! [[feature_classes.rows]]
//! OBJECTID = 1
//! SHAPE = "POLYGON ((0 0, 1 0, 1 1, 0 0))"
//! ```

use crate::adapters::engine::EngineResult;
use crate::config::loader::substitute_env_vars;
use crate::config::SecretString;
use crate::domain::EngineError;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Parsed connection descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDescriptor {
    /// Connection properties
    pub connection: ConnectionProperties,

    /// Feature classes served by the source, in catalog order
    #[serde(default)]
    pub feature_classes: Vec<FeatureClassDef>,
}

/// Connection properties of the source geodatabase
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionProperties {
    /// Server host name
    pub server: String,

    /// Service or instance (e.g. "sde:oracle11g" or a port)
    #[serde(default)]
    pub instance: Option<String>,

    /// Database name, for engines that need one
    #[serde(default)]
    pub database: Option<String>,

    /// User for database authentication
    #[serde(default)]
    pub user: Option<String>,

    /// Password for database authentication
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Geodatabase version to read from
    #[serde(default = "default_version")]
    pub version: String,
}

impl ConnectionProperties {
    fn validate(&self) -> Result<(), String> {
        if self.server.trim().is_empty() {
            return Err("connection.server cannot be empty".to_string());
        }

        if self.user.is_some() {
            let has_password = self
                .password
                .as_ref()
                .is_some_and(|p| !p.expose_secret().is_empty());
            if !has_password {
                return Err("connection.password is required when connection.user is set".to_string());
            }
        }

        Ok(())
    }
}

/// One feature class in the source catalog
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureClassDef {
    /// Qualified catalog name (e.g. "T.TAB1")
    pub name: String,

    #[serde(default)]
    pub alias: Option<String>,

    pub geometry_type: GeometryType,

    #[serde(default)]
    pub spatial_reference: Option<String>,

    /// Free-text description exported as metadata
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDef>,

    /// Rows keyed by field name
    #[serde(default)]
    pub rows: Vec<BTreeMap<String, serde_json::Value>>,
}

impl FeatureClassDef {
    /// Name of the geometry field, "SHAPE" when none is declared
    pub fn shape_field(&self) -> &str {
        self.fields
            .iter()
            .find(|f| f.field_type == FieldType::Geometry)
            .map(|f| f.name.as_str())
            .unwrap_or("SHAPE")
    }
}

/// Attribute field definition
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub alias: Option<String>,

    #[serde(default)]
    pub length: Option<u32>,

    #[serde(default = "default_true")]
    pub nullable: bool,
}

impl FieldDef {
    /// Storage length, defaulting per field type
    pub fn effective_length(&self) -> u32 {
        self.length.unwrap_or(match self.field_type {
            FieldType::SmallInteger => 2,
            FieldType::Oid | FieldType::Integer | FieldType::Single => 4,
            FieldType::Double | FieldType::Date | FieldType::Geometry => 8,
            FieldType::Guid | FieldType::GlobalId => 38,
            FieldType::String => 50,
        })
    }

    /// OID fields are never nullable, whatever the descriptor says
    pub fn is_nullable(&self) -> bool {
        self.nullable && self.field_type != FieldType::Oid
    }
}

/// Field types understood by the local engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Oid,
    SmallInteger,
    Integer,
    Single,
    Double,
    String,
    Date,
    Geometry,
    Guid,
    GlobalId,
}

impl FieldType {
    /// Field type name in XML workspace documents
    pub fn esri_name(self) -> &'static str {
        match self {
            FieldType::Oid => "esriFieldTypeOID",
            FieldType::SmallInteger => "esriFieldTypeSmallInteger",
            FieldType::Integer => "esriFieldTypeInteger",
            FieldType::Single => "esriFieldTypeSingle",
            FieldType::Double => "esriFieldTypeDouble",
            FieldType::String => "esriFieldTypeString",
            FieldType::Date => "esriFieldTypeDate",
            FieldType::Geometry => "esriFieldTypeGeometry",
            FieldType::Guid => "esriFieldTypeGUID",
            FieldType::GlobalId => "esriFieldTypeGlobalID",
        }
    }

    /// XML Schema type used for record values
    pub fn value_type(self) -> &'static str {
        match self {
            FieldType::Oid | FieldType::Integer => "xs:int",
            FieldType::SmallInteger => "xs:short",
            FieldType::Single => "xs:float",
            FieldType::Double => "xs:double",
            FieldType::Date => "xs:dateTime",
            FieldType::String | FieldType::Guid | FieldType::GlobalId | FieldType::Geometry => {
                "xs:string"
            }
        }
    }
}

/// Geometry types understood by the local engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Point,
    Multipoint,
    Polyline,
    Polygon,
    Multipatch,
}

impl GeometryType {
    pub fn esri_name(self) -> &'static str {
        match self {
            GeometryType::Point => "esriGeometryPoint",
            GeometryType::Multipoint => "esriGeometryMultipoint",
            GeometryType::Polyline => "esriGeometryPolyline",
            GeometryType::Polygon => "esriGeometryPolygon",
            GeometryType::Multipatch => "esriGeometryMultiPatch",
        }
    }

    /// Short geometry name used in record value types (e.g. "esri:PolygonB")
    pub fn value_name(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::Multipoint => "Multipoint",
            GeometryType::Polyline => "Polyline",
            GeometryType::Polygon => "Polygon",
            GeometryType::Multipatch => "MultiPatch",
        }
    }
}

/// Parse a connection descriptor from TOML text
///
/// # Errors
///
/// Returns [`EngineError::ConnectionFailed`] if the text is not a valid
/// descriptor.
pub fn parse_descriptor(contents: &str) -> EngineResult<ConnectionDescriptor> {
    let contents =
        substitute_env_vars(contents).map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;

    let descriptor: ConnectionDescriptor = toml::from_str(&contents).map_err(|e| {
        EngineError::ConnectionFailed(format!("Invalid connection descriptor: {e}"))
    })?;

    descriptor
        .connection
        .validate()
        .map_err(EngineError::ConnectionFailed)?;

    if let Some(unnamed) = descriptor
        .feature_classes
        .iter()
        .position(|fc| fc.name.trim().is_empty())
    {
        return Err(EngineError::CatalogFailed(format!(
            "feature class #{} has an empty name",
            unnamed + 1
        )));
    }

    Ok(descriptor)
}

/// Load a connection descriptor from a file
///
/// # Errors
///
/// Returns [`EngineError::ConnectionFailed`] if the file is missing,
/// unreadable or invalid.
pub fn load_descriptor(path: impl AsRef<Path>) -> EngineResult<ConnectionDescriptor> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EngineError::ConnectionFailed(format!(
            "Connection descriptor not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EngineError::ConnectionFailed(format!(
            "Failed to read connection descriptor {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_descriptor(&contents)
}

fn default_version() -> String {
    "SDE.DEFAULT".to_string()
}

fn default_true() -> bool {
    true
}
