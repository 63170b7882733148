//! Excel rendering of the finished report model
//!
//! Thin presentation layer over `rust_xlsxwriter`: lays out headers and rows,
//! applies the workbook policy (frozen header, filters, zoom, column sizing,
//! sentinel highlighting, group tab markers) and renders the cross-reference
//! annotations as hyperlinks. All content decisions were made upstream; this
//! module never alters a cell value.

use georeport_core::config::ReportConfig;
use georeport_core::error::{ReportError, Result};
use georeport_core::types::SENTINEL;
use rust_xlsxwriter::{Color, Format, Url, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

use crate::report::model::{ReportModel, SHEET_LAYER_GROUPS, SheetData};
use crate::report::xref::{LinkSet, LinkTarget};

/// Font color applied to sentinel cells
const SENTINEL_FONT: Color = Color::RGB(0x0000_8B);
/// Tab color marking group sub-sheets
const GROUP_TAB: Color = Color::RGB(0x00AD_D8E6);

/// Renderer carrying the presentation policy
pub struct ExcelRenderer<'a> {
    config: &'a ReportConfig,
}

impl<'a> ExcelRenderer<'a> {
    /// Create a renderer with the given output configuration
    #[must_use]
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Render the model and save the artifact to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if a sheet cannot be laid out (including duplicate
    /// truncated sheet titles) or the file cannot be written.
    pub fn write_artifact(
        &self,
        model: &ReportModel,
        links: &LinkSet,
        path: &Path,
    ) -> Result<()> {
        let mut workbook = self.build_workbook(model, links)?;
        workbook
            .save(path)
            .map_err(|e| ReportError::workbook(e.to_string()))?;
        info!(path = %path.display(), "report artifact written");
        Ok(())
    }

    /// Render the model into workbook bytes
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::write_artifact`], without touching the
    /// filesystem.
    pub fn render_to_buffer(&self, model: &ReportModel, links: &LinkSet) -> Result<Vec<u8>> {
        let mut workbook = self.build_workbook(model, links)?;
        workbook
            .save_to_buffer()
            .map_err(|e| ReportError::workbook(e.to_string()))
    }

    fn build_workbook(&self, model: &ReportModel, links: &LinkSet) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let sentinel_format = Format::new().set_font_color(SENTINEL_FONT);

        for sheet in model.sheets(self.config.sheet_title_limit) {
            let worksheet = workbook
                .add_worksheet()
                .set_name(&sheet.title)
                .map_err(|e| ReportError::render(&sheet.title, e.to_string()))?;

            if sheet.group_tab {
                worksheet.set_tab_color(GROUP_TAB);
            }
            if sheet.title == SHEET_LAYER_GROUPS {
                worksheet.set_active(true);
            }

            self.write_sheet(worksheet, &sheet, links, &header_format, &sentinel_format)?;
            debug!(sheet = %sheet.title, rows = sheet.rows.len(), "sheet rendered");
        }

        Ok(workbook)
    }

    fn write_sheet(
        &self,
        worksheet: &mut Worksheet,
        sheet: &SheetData,
        links: &LinkSet,
        header_format: &Format,
        sentinel_format: &Format,
    ) -> Result<()> {
        let fail = |e: rust_xlsxwriter::XlsxError| ReportError::render(&sheet.title, e.to_string());

        for (col, header) in sheet.headers.iter().enumerate() {
            let col = col_index(col, &sheet.title)?;
            match links.get(&sheet.title, 0, col) {
                Some(target) => {
                    worksheet
                        .write_url_with_text(0, col, link_url(target), *header)
                        .map_err(fail)?;
                }
                None => {
                    worksheet
                        .write_string_with_format(0, col, *header, header_format)
                        .map_err(fail)?;
                }
            }
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx).map_err(|_| {
                ReportError::render(&sheet.title, "row index exceeds sheet capacity")
            })? + 1;
            for (col, value) in row.iter().enumerate() {
                let col = col_index(col, &sheet.title)?;
                if let Some(target) = links.get(&sheet.title, row_num, col) {
                    worksheet
                        .write_url_with_text(row_num, col, link_url(target), value)
                        .map_err(fail)?;
                } else if value == SENTINEL {
                    worksheet
                        .write_string_with_format(row_num, col, value, sentinel_format)
                        .map_err(fail)?;
                } else {
                    worksheet.write_string(row_num, col, value).map_err(fail)?;
                }
            }
        }

        self.apply_layout(worksheet, sheet).map_err(fail)
    }

    /// Frozen header, filters, zoom and capped column sizing
    fn apply_layout(
        &self,
        worksheet: &mut Worksheet,
        sheet: &SheetData,
    ) -> std::result::Result<(), rust_xlsxwriter::XlsxError> {
        for (col, header) in sheet.headers.iter().enumerate() {
            let longest = sheet
                .rows
                .iter()
                .map(|row| row.get(col).map_or(0, |v| v.chars().count()))
                .max()
                .unwrap_or(0)
                .max(header.chars().count());
            let width = (longest + 2).min(self.config.max_column_width);
            let col = u16::try_from(col).unwrap_or(u16::MAX);
            #[allow(clippy::cast_precision_loss)]
            worksheet.set_column_width(col, width as f64)?;
        }

        worksheet.set_freeze_panes(1, 0)?;
        let last_row = u32::try_from(sheet.rows.len()).unwrap_or(u32::MAX);
        let last_col = u16::try_from(sheet.headers.len().saturating_sub(1)).unwrap_or(0);
        worksheet.autofilter(0, 0, last_row, last_col)?;
        worksheet.set_zoom(self.config.zoom);
        Ok(())
    }
}

fn col_index(col: usize, sheet: &str) -> Result<u16> {
    u16::try_from(col).map_err(|_| ReportError::render(sheet, "column index exceeds sheet capacity"))
}

fn link_url(target: &LinkTarget) -> Url {
    match target {
        LinkTarget::Internal { sheet, cell } => Url::new(format!("internal:'{sheet}'!{cell}")),
        LinkTarget::External(url) => Url::new(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{associations, model, normalize, xref};
    use georeport_core::types::{RawLayerGroup, RawStyleRef, RawWorkspace};
    use std::collections::HashSet;

    const BASE: &str = "http://example.org/rest";

    fn small_model(group_names: &[&str]) -> ReportModel {
        let raw_groups: Vec<RawLayerGroup> = group_names
            .iter()
            .map(|name| RawLayerGroup {
                name: (*name).to_string(),
                title: Some("A group".to_string()),
                ..RawLayerGroup::default()
            })
            .collect();
        let assoc = associations::resolve(&raw_groups, &HashSet::new());

        model::build(
            vec![normalize::workspace(RawWorkspace {
                name: "ws1".to_string(),
                href: None,
            })],
            Vec::new(),
            raw_groups.into_iter().map(normalize::layer_group).collect(),
            Vec::new(),
            vec![normalize::style(
                RawStyleRef {
                    name: Some("line".to_string()),
                },
                BASE,
            )],
            &assoc,
        )
    }

    #[test]
    fn test_workbook_renders_to_buffer() {
        let config = ReportConfig::default();
        let model = small_model(&["basemap"]);
        let links = xref::resolve(&model, config.sheet_title_limit);

        let buffer = ExcelRenderer::new(&config)
            .render_to_buffer(&model, &links)
            .expect("workbook renders");
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_truncated_title_collision_is_an_error() {
        let config = ReportConfig::default();
        // Distinct group names sharing their first 25 characters collide
        // after truncation; the sink rejects the duplicate sheet name.
        let model = small_model(&[
            "shared_prefix_that_is_long_A",
            "shared_prefix_that_is_long_B",
        ]);
        let links = xref::resolve(&model, config.sheet_title_limit);

        let result = ExcelRenderer::new(&config).render_to_buffer(&model, &links);
        assert!(result.is_err());
    }

    #[test]
    fn test_artifact_written_to_disk() {
        let config = ReportConfig::default();
        let model = small_model(&["basemap"]);
        let links = xref::resolve(&model, config.sheet_title_limit);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.xlsx");
        ExcelRenderer::new(&config)
            .write_artifact(&model, &links, &path)
            .expect("artifact saved");
        assert!(path.metadata().expect("artifact exists").len() > 0);
    }
}
