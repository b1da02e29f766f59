use super::model::{Bank, NewReport, Report};
use crate::app_config::AppConfig;
use crate::constants::{CREATE_REPORT_FAILED, FETCH_BANKS_FAILED, FETCH_REPORTS_FAILED};
use crate::error::ApiError;
use crate::http::{HttpTransport, Transport};
use crate::resource::{Slot, Status, Subscribers};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Resources owned by a [`ReportStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportResource {
    Reports,
    Banks,
    Submission,
}

/// Paths of the Reports API, relative to its base URL.
#[derive(Debug, Clone)]
pub struct ReportEndpoints {
    pub reports: String,
    pub banks: String,
}

impl Default for ReportEndpoints {
    fn default() -> Self {
        let defaults = crate::app_config::ReportsApiConfig::default();
        Self {
            reports: defaults.reports_path,
            banks: defaults.banks_path,
        }
    }
}

/// Marks a submission as in flight until dropped, including when the
/// submitting future is dropped before it completes.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Client-side cache of reports and banks.
///
/// Fetches never return errors; they record a message on the resource and log
/// the cause. Only [`ReportStore::create_report`] hands its error back.
pub struct ReportStore {
    api: Arc<dyn Transport>,
    endpoints: ReportEndpoints,
    reports: Slot<Vec<Report>>,
    banks: Slot<Vec<Bank>>,
    submitting: AtomicUsize,
    submission_error: RwLock<Option<String>>,
    last_error: RwLock<Option<(ReportResource, String)>>,
    subscribers: Subscribers<ReportResource>,
}

impl ReportStore {
    pub fn new(api: Arc<dyn Transport>, endpoints: ReportEndpoints) -> Self {
        Self {
            api,
            endpoints,
            reports: Slot::new(Vec::new()),
            banks: Slot::new(Vec::new()),
            submitting: AtomicUsize::new(0),
            submission_error: RwLock::new(None),
            last_error: RwLock::new(None),
            subscribers: Subscribers::default(),
        }
    }

    /// Build a store backed by the HTTP transport.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config.reports_api.base_url, &config.http)?;
        Ok(Self::new(
            Arc::new(transport),
            ReportEndpoints {
                reports: config.reports_api.reports_path.clone(),
                banks: config.reports_api.banks_path.clone(),
            },
        ))
    }

    /// Fetch reports and banks concurrently; neither waits on the other.
    pub async fn load(&self) {
        futures::join!(self.fetch_reports(), self.fetch_banks());
    }

    /// Replace the local reports with the backend's full collection.
    pub async fn fetch_reports(&self) {
        let path = self.endpoints.reports.clone();
        self.fetch_into(&self.reports, &path, ReportResource::Reports, FETCH_REPORTS_FAILED)
            .await
    }

    /// Replace the local bank list with the backend's.
    pub async fn fetch_banks(&self) {
        let path = self.endpoints.banks.clone();
        self.fetch_into(&self.banks, &path, ReportResource::Banks, FETCH_BANKS_FAILED)
            .await
    }

    async fn fetch_into<T>(
        &self,
        slot: &Slot<Vec<T>>,
        path: &str,
        resource: ReportResource,
        failure: &str,
    ) where
        T: DeserializeOwned,
    {
        let ticket = slot.begin();
        self.subscribers.notify(resource);

        let result = self
            .api
            .get(path, &[])
            .await
            .and_then(|body| serde_json::from_value::<Vec<T>>(body).map_err(ApiError::from));

        let applied = match result {
            Ok(items) => {
                let count = items.len();
                let applied = slot.update(|r| r.succeed(ticket, items));
                if applied {
                    log::debug!("{:?}: loaded {} items", resource, count);
                    self.clear_last_error(resource);
                }
                applied
            }
            Err(e) => {
                log::error!("{:?}: {}: {}", resource, failure, e);
                let applied = slot.update(|r| r.fail(ticket, failure));
                if applied {
                    self.set_last_error(resource, failure);
                }
                applied
            }
        };

        if applied {
            self.subscribers.notify(resource);
        } else {
            log::debug!("{:?}: discarded stale response", resource);
        }
    }

    /// Submit a report. On success the created report is prepended locally.
    ///
    /// On failure the local collection is left unchanged, the failure is
    /// recorded and the error is returned so the caller can notify the user.
    pub async fn create_report(&self, report: NewReport) -> Result<Report, ApiError> {
        let result = {
            let _in_flight = InFlight::enter(&self.submitting);
            self.subscribers.notify(ReportResource::Submission);
            self.submit(report).await
        };

        match &result {
            Ok(created) => {
                let id = created.id.clone();
                self.reports.update(|r| {
                    let reports = r.data_mut();
                    if let Some(pos) = reports.iter().position(|existing| existing.id == id) {
                        log::warn!("Report {} already present locally, replacing it", id);
                        reports.remove(pos);
                    }
                    reports.insert(0, created.clone());
                });
                *self
                    .submission_error
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = None;
                self.clear_last_error(ReportResource::Submission);
                log::info!("Report {} created", id);
                self.subscribers.notify(ReportResource::Reports);
            }
            Err(e) => {
                log::error!("{}: {}", CREATE_REPORT_FAILED, e);
                *self
                    .submission_error
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(CREATE_REPORT_FAILED.to_string());
                self.set_last_error(ReportResource::Submission, CREATE_REPORT_FAILED);
            }
        }

        self.subscribers.notify(ReportResource::Submission);
        result
    }

    async fn submit(&self, report: NewReport) -> Result<Report, ApiError> {
        let body = self
            .api
            .post_multipart(&self.endpoints.reports, report.into_multipart())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    fn set_last_error(&self, resource: ReportResource, message: &str) {
        *self.last_error.write().unwrap_or_else(PoisonError::into_inner) =
            Some((resource, message.to_string()));
    }

    fn clear_last_error(&self, resource: ReportResource) {
        let mut last = self.last_error.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(&*last, Some((r, _)) if *r == resource) {
            *last = None;
        }
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.get()
    }

    pub fn banks(&self) -> Vec<Bank> {
        self.banks.get()
    }

    /// Look up a report by identity.
    pub fn report(&self, id: &str) -> Option<Report> {
        self.reports
            .read(|r| r.data().iter().find(|report| report.id == id).cloned())
    }

    pub fn bank_by_name(&self, name: &str) -> Option<Bank> {
        self.banks.read(|r| {
            r.data()
                .iter()
                .find(|bank| bank.name.eq_ignore_ascii_case(name))
                .cloned()
        })
    }

    pub fn status(&self, resource: ReportResource) -> Status {
        match resource {
            ReportResource::Reports => self.reports.status(),
            ReportResource::Banks => self.banks.status(),
            ReportResource::Submission if self.is_submitting() => Status::Loading,
            ReportResource::Submission => match self.error(ReportResource::Submission) {
                Some(_) => Status::Error,
                None => Status::Idle,
            },
        }
    }

    pub fn error(&self, resource: ReportResource) -> Option<String> {
        match resource {
            ReportResource::Reports => self.reports.error(),
            ReportResource::Banks => self.banks.error(),
            ReportResource::Submission => self
                .submission_error
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    /// The most recent failure message across all resources, if it has not
    /// since been cleared by a success of the same resource.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, message)| message.clone())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst) > 0
    }

    /// True while any fetch or submission is in flight.
    pub fn is_loading(&self) -> bool {
        self.reports.is_loading() || self.banks.is_loading() || self.is_submitting()
    }

    /// Register a callback run after each state change, with the resource that changed.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(ReportResource) + Send + Sync + 'static,
    {
        self.subscribers.add(callback);
    }
}
