pub mod columns;
pub mod deserializers;
pub mod pipeline;
pub mod response;
pub mod types;

pub use pipeline::{inspect_dataset, parse_dataset, parse_dataset_reader, validate_file_type, ParseOutput};
pub use response::{
    decode_full_data, decode_informer_status, decode_prediction_response, FullDataRequest,
    InformerEnvironment, InformerStatus, PredictionRequest, PredictionResult, PredictionSummary,
    ProductPrediction, StoredUpload,
};
pub use types::{DatasetInfo, DateRange, ParseWarning, ReviewRecord, Tag};
