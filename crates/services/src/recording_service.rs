//! Upload, list, and delete practice recordings for one activity day.

use std::sync::Arc;

use chrono::NaiveDate;

use practice_core::model::ActivityId;
use practice_core::week::WeekKey;

use crate::api::{PracticeApi, RecordingInfo, RecordingUpload};
use crate::error::RecordingServiceError;

#[derive(Clone)]
pub struct RecordingService {
    api: Arc<dyn PracticeApi>,
}

impl RecordingService {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>) -> Self {
        Self { api }
    }

    pub async fn save(
        &self,
        activity: ActivityId,
        week: WeekKey,
        day: NaiveDate,
        bytes: Vec<u8>,
        mime_type: String,
    ) -> Result<RecordingInfo, RecordingServiceError> {
        let upload = RecordingUpload {
            activity_id: activity,
            week_key: week,
            day,
            bytes,
            mime_type,
        };
        Ok(self.api.save_recording(upload).await?)
    }

    pub async fn list(
        &self,
        activity: ActivityId,
        week: WeekKey,
        day: Option<NaiveDate>,
    ) -> Result<Vec<RecordingInfo>, RecordingServiceError> {
        Ok(self.api.list_recordings(activity, week, day).await?)
    }

    pub async fn delete(
        &self,
        activity: ActivityId,
        week: WeekKey,
        filename: String,
    ) -> Result<(), RecordingServiceError> {
        Ok(self.api.delete_recording(activity, week, filename).await?)
    }
}
