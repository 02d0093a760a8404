pub mod report_pipeline;
pub mod report_service;
pub mod template_service;

pub use report_pipeline::{Analysis, FilteredImage, PlotImage, Report, ReportError, ReportPipeline};
pub use report_service::ReportService;
pub use template_service::{TemplateError, TemplateService};
