//! XML workspace document writer

use crate::adapters::engine::{EngineResult, ExportOptions};
use crate::adapters::local::descriptor::{FeatureClassDef, FieldDef, FieldType};
use crate::domain::EngineError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{SecondsFormat, Utc};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Workspace document namespace
pub const ESRI_NS: &str = "http://www.esri.com/schemas/ArcGIS/10.0";

/// XML Schema instance namespace
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML Schema namespace
pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// One dataset to write, with its destination name
#[derive(Debug, Clone, Copy)]
pub struct DatasetExport<'a> {
    pub definition: &'a FeatureClassDef,
    pub target_name: &'a str,
}

/// Write an XML workspace document
///
/// With `with_data` unset only the `WorkspaceDefinition` is populated and
/// `WorkspaceData` is written empty.
///
/// # Errors
///
/// Returns [`EngineError::TransferFailed`] if the file cannot be created or
/// written.
pub fn write_workspace_document(
    output: &Path,
    datasets: &[DatasetExport<'_>],
    options: ExportOptions,
    with_data: bool,
) -> EngineResult<()> {
    let file = File::create(output).map_err(|e| {
        EngineError::TransferFailed(format!("create {}: {e}", output.display()))
    })?;
    let mut xml = Writer::new_with_indent(BufWriter::new(file), b' ', 2);

    write(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("esri:Workspace");
    root.push_attribute(("xmlns:esri", ESRI_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xmlns:xs", XS_NS));
    write(&mut xml, Event::Start(root))?;

    start(&mut xml, "WorkspaceDefinition", "esri:WorkspaceDefinition")?;
    text_element(&mut xml, "WorkspaceType", "esriLocalDatabaseWorkspace")?;
    text_element(&mut xml, "Version", "")?;
    empty(&mut xml, "Domains", "esri:ArrayOfDomain")?;
    start(&mut xml, "DatasetDefinitions", "esri:ArrayOfDataElement")?;
    for dataset in datasets {
        write_data_element(&mut xml, dataset, options)?;
    }
    end(&mut xml, "DatasetDefinitions")?;
    end(&mut xml, "WorkspaceDefinition")?;

    if with_data {
        start(&mut xml, "WorkspaceData", "esri:WorkspaceData")?;
        for dataset in datasets {
            write_dataset_data(&mut xml, dataset, options)?;
        }
        end(&mut xml, "WorkspaceData")?;
    } else {
        empty(&mut xml, "WorkspaceData", "esri:WorkspaceData")?;
    }

    write(&mut xml, Event::End(BytesEnd::new("esri:Workspace")))?;

    xml.into_inner()
        .flush()
        .map_err(|e| EngineError::TransferFailed(format!("write {}: {e}", output.display())))
}

fn write_data_element<W: Write>(
    xml: &mut Writer<W>,
    dataset: &DatasetExport<'_>,
    options: ExportOptions,
) -> EngineResult<()> {
    let def = dataset.definition;

    start(xml, "DataElement", "esri:DEFeatureClass")?;
    text_element(xml, "CatalogPath", &format!("/FC={}", dataset.target_name))?;
    text_element(xml, "Name", dataset.target_name)?;
    text_element(xml, "DatasetType", "esriDTFeatureClass")?;
    text_element(xml, "FeatureType", "esriFTSimple")?;
    text_element(xml, "ShapeType", def.geometry_type.esri_name())?;
    text_element(xml, "ShapeFieldName", def.shape_field())?;
    text_element(
        xml,
        "AliasName",
        def.alias.as_deref().unwrap_or(dataset.target_name),
    )?;

    start(xml, "Fields", "esri:Fields")?;
    start(xml, "FieldArray", "esri:ArrayOfField")?;
    for field in &def.fields {
        write_field(xml, field)?;
    }
    end(xml, "FieldArray")?;
    end(xml, "Fields")?;

    if let Some(srs) = &def.spatial_reference {
        start(xml, "SpatialReference", "esri:ProjectedCoordinateSystem")?;
        text_element(xml, "WKT", srs)?;
        end(xml, "SpatialReference")?;
    }

    if options.include_metadata {
        start(xml, "Metadata", "esri:XmlPropertySet")?;
        text_element(xml, "XmlDoc", &metadata_document(def))?;
        end(xml, "Metadata")?;
    }

    end(xml, "DataElement")
}

fn write_field<W: Write>(xml: &mut Writer<W>, field: &FieldDef) -> EngineResult<()> {
    start(xml, "Field", "esri:Field")?;
    text_element(xml, "Name", &field.name)?;
    text_element(xml, "Type", field.field_type.esri_name())?;
    text_element(xml, "IsNullable", bool_text(field.is_nullable()))?;
    text_element(xml, "Length", &field.effective_length().to_string())?;
    text_element(xml, "Required", bool_text(!field.is_nullable()))?;
    if let Some(alias) = &field.alias {
        text_element(xml, "AliasName", alias)?;
    }
    end(xml, "Field")
}

fn write_dataset_data<W: Write>(
    xml: &mut Writer<W>,
    dataset: &DatasetExport<'_>,
    options: ExportOptions,
) -> EngineResult<()> {
    let def = dataset.definition;

    start(xml, "DatasetData", "esri:TableData")?;
    text_element(xml, "DatasetName", dataset.target_name)?;
    text_element(xml, "DatasetType", "esriDTFeatureClass")?;
    start(xml, "Data", "esri:RecordSet")?;
    start(xml, "Records", "esri:ArrayOfRecord")?;
    for row in &def.rows {
        start(xml, "Record", "esri:Record")?;
        start(xml, "Values", "esri:ArrayOfValue")?;
        for field in &def.fields {
            match row.get(&field.name) {
                None | Some(serde_json::Value::Null) => {
                    let mut value = BytesStart::new("Value");
                    value.push_attribute(("xsi:nil", "true"));
                    write(xml, Event::Empty(value))?;
                }
                Some(value) if field.field_type == FieldType::Geometry => {
                    write_geometry_value(xml, def, &value_text(value), options)?;
                }
                Some(value) => {
                    let mut element = BytesStart::new("Value");
                    element.push_attribute(("xsi:type", field.field_type.value_type()));
                    write(xml, Event::Start(element))?;
                    write(xml, Event::Text(BytesText::new(&value_text(value))))?;
                    write(xml, Event::End(BytesEnd::new("Value")))?;
                }
            }
        }
        end(xml, "Values")?;
        end(xml, "Record")?;
    }
    end(xml, "Records")?;
    end(xml, "Data")?;
    end(xml, "DatasetData")
}

fn write_geometry_value<W: Write>(
    xml: &mut Writer<W>,
    def: &FeatureClassDef,
    wkt: &str,
    options: ExportOptions,
) -> EngineResult<()> {
    let shape = def.geometry_type.value_name();
    if options.binary_geometry {
        start(xml, "Value", &format!("esri:{shape}B"))?;
        text_element(xml, "Bytes", &STANDARD.encode(wkt.as_bytes()))?;
    } else {
        start(xml, "Value", &format!("esri:{shape}N"))?;
        text_element(xml, "WKT", wkt)?;
    }
    end(xml, "Value")
}

/// Minimal metadata document embedded as text in `XmlDoc`
fn metadata_document(def: &FeatureClassDef) -> String {
    let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let description = def.description.as_deref().unwrap_or_default();
    format!(
        "<metadata><Esri><CreaDate>{created}</CreaDate><DataProperties><itemProps><itemName>{}</itemName></itemProps></DataProperties></Esri><dataIdInfo><idAbs>{}</idAbs></dataIdInfo></metadata>",
        escape(&def.name),
        escape(description)
    )
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn xml_error(err: impl std::fmt::Display) -> EngineError {
    EngineError::TransferFailed(format!("XML write failed: {err}"))
}

fn write<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> EngineResult<()> {
    xml.write_event(event).map_err(xml_error)
}

fn start<W: Write>(xml: &mut Writer<W>, name: &str, xsi_type: &str) -> EngineResult<()> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("xsi:type", xsi_type));
    write(xml, Event::Start(element))
}

fn empty<W: Write>(xml: &mut Writer<W>, name: &str, xsi_type: &str) -> EngineResult<()> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("xsi:type", xsi_type));
    write(xml, Event::Empty(element))
}

fn end<W: Write>(xml: &mut Writer<W>, name: &str) -> EngineResult<()> {
    write(xml, Event::End(BytesEnd::new(name)))
}

fn text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> EngineResult<()> {
    write(xml, Event::Start(BytesStart::new(name)))?;
    write(xml, Event::Text(BytesText::new(text)))?;
    write(xml, Event::End(BytesEnd::new(name)))
}
