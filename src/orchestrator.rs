// src/orchestrator.rs
//! View state and the flows that change it.
//!
//! The orchestrator never touches the network. Each user action returns the
//! tasks to run; the shell runs them and feeds each finished [`Outcome`] back
//! through [`Orchestrator::complete`]. Responses are applied in the order
//! they arrive, so when two calls of the same flow overlap the later answer
//! wins.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::api::{request, ApiRequest, Outcome};
use crate::data_types::Display;
use crate::interpret::{self, DataView, TableListing, UploadOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Upload,
    Tables,
    Data,
    Query,
    Logs,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flow::Upload => "upload",
            Flow::Tables => "tables",
            Flow::Data => "data",
            Flow::Query => "query",
            Flow::Logs => "logs",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    pub flow: Flow,
    pub generation: u64,
}

/// A request the shell should send, tagged so its answer can be routed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub request: ApiRequest,
}

/// Input fields, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    pub upload_table: String,
    pub upload_file: Option<PathBuf>,
    pub fetch_table: String,
    pub query_table: String,
    pub filters: String,
    pub limit: String,
    pub offset: String,
}

/// Independently addressable display regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    UploadResult,
    TableData,
    QueryResult,
    Tables,
    Logs,
}

#[derive(Debug, Clone, Default)]
pub struct Slot {
    pub content: Display,
    pub updated_at: Option<DateTime<Local>>,
}

impl Slot {
    fn show(&mut self, content: Display) {
        self.content = content;
        self.updated_at = Some(Local::now());
    }

    fn busy(&mut self, label: &str) {
        self.content = Display::Busy(label.to_string());
    }
}

#[derive(Debug, Default)]
struct Views {
    upload_result: Slot,
    table_data: Slot,
    query_result: Slot,
    tables_status: Slot,
    logs: Slot,
    tables: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    pub fields: Fields,
    views: Views,
    generations: HashMap<Flow, u64>,
    // Table name each in-flight upload was submitted with.
    uploads: HashMap<u64, String>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Startup work: the table list loads without any user action.
    pub fn init(&mut self) -> Vec<Task> {
        self.refresh_tables()
    }

    pub fn slot(&self, region: Region) -> &Slot {
        match region {
            Region::UploadResult => &self.views.upload_result,
            Region::TableData => &self.views.table_data,
            Region::QueryResult => &self.views.query_result,
            Region::Tables => &self.views.tables_status,
            Region::Logs => &self.views.logs,
        }
    }

    pub fn display(&self, region: Region) -> &Display {
        &self.slot(region).content
    }

    pub fn tables(&self) -> &[String] {
        &self.views.tables
    }

    pub fn submit_upload(&mut self) -> Vec<Task> {
        let table = self.fields.upload_table.trim().to_string();
        match request::upload_csv(&table, self.fields.upload_file.as_deref()) {
            Ok(request) => {
                self.views.upload_result.busy("Uploading...");
                let task = self.spawn(Flow::Upload, request);
                self.uploads.insert(task.id.generation, table);
                vec![task]
            }
            Err(missing) => {
                debug!(%missing, "Upload not sent");
                self.views.upload_result.show(Display::Text(missing.to_string()));
                Vec::new()
            }
        }
    }

    pub fn fetch_data(&mut self) -> Vec<Task> {
        match request::fetch_data(&self.fields.fetch_table) {
            Ok(request) => {
                self.views.table_data.busy("Loading data...");
                vec![self.spawn(Flow::Data, request)]
            }
            Err(missing) => {
                debug!(%missing, "Fetch not sent");
                self.views.table_data.show(Display::Text(missing.to_string()));
                Vec::new()
            }
        }
    }

    /// Runs the filtered query. A blank table name abandons the action
    /// without any message.
    pub fn submit_query(&mut self) -> Vec<Task> {
        let fields = &self.fields;
        let Some(request) =
            request::query_data(&fields.query_table, &fields.filters, &fields.limit, &fields.offset)
        else {
            debug!("Query ignored: no table name");
            return Vec::new();
        };
        self.views.query_result.busy("Loading query...");
        vec![self.spawn(Flow::Query, request)]
    }

    /// A click on a listed table makes it the fetch and query target and
    /// loads its data straight away.
    pub fn select_table(&mut self, table: &str) -> Vec<Task> {
        self.fields.fetch_table = table.to_string();
        self.fields.query_table = table.to_string();
        self.fetch_data()
    }

    pub fn refresh_tables(&mut self) -> Vec<Task> {
        self.views.tables_status.busy("Loading tables...");
        vec![self.spawn(Flow::Tables, request::list_tables())]
    }

    pub fn load_logs(&mut self) -> Vec<Task> {
        self.views.logs.busy("Loading logs...");
        vec![self.spawn(Flow::Logs, request::fetch_logs())]
    }

    /// Applies a finished task to the regions its flow owns and returns any
    /// follow-up tasks.
    pub fn complete(&mut self, id: TaskId, outcome: Outcome) -> Vec<Task> {
        match &outcome {
            Ok(response) => info!(
                flow = %id.flow,
                generation = id.generation,
                status = response.status,
                "Task completed"
            ),
            Err(err) => warn!(
                flow = %id.flow,
                generation = id.generation,
                error = %err,
                "Task failed"
            ),
        }

        match id.flow {
            Flow::Upload => self.finish_upload(id, &outcome),
            Flow::Data => {
                let content = interpret::data(DataView::Fetch, &outcome);
                self.views.table_data.show(content);
                Vec::new()
            }
            Flow::Query => {
                let content = interpret::data(DataView::Query, &outcome);
                self.views.query_result.show(content);
                Vec::new()
            }
            Flow::Tables => {
                match interpret::tables(&outcome) {
                    TableListing::Listed(tables) => {
                        self.views.tables = tables;
                        self.views.tables_status.show(Display::Empty);
                    }
                    TableListing::Failed(message) => {
                        self.views.tables.clear();
                        self.views.tables_status.show(Display::Text(message));
                    }
                }
                Vec::new()
            }
            Flow::Logs => {
                let content = interpret::logs(&outcome);
                self.views.logs.show(content);
                Vec::new()
            }
        }
    }

    fn finish_upload(&mut self, id: TaskId, outcome: &Outcome) -> Vec<Task> {
        let table = self.uploads.remove(&id.generation).unwrap_or_default();
        // A repeat upload needs the file picked again.
        self.fields.upload_file = None;

        let result = interpret::upload(outcome);
        let text = Display::text(result.message());
        match result {
            UploadOutcome::Accepted(_) => {
                self.views.upload_result.show(text);
                self.fields.fetch_table = table.clone();
                self.fields.query_table = table;
                let mut tasks = self.fetch_data();
                tasks.extend(self.refresh_tables());
                tasks
            }
            UploadOutcome::Rejected(_) => {
                self.views.upload_result.show(text.clone());
                self.views.table_data.show(text);
                self.refresh_tables()
            }
            UploadOutcome::Malformed => {
                self.views.upload_result.show(text);
                self.views.table_data.show(Display::Empty);
                Vec::new()
            }
            UploadOutcome::Unreachable(_) => {
                self.views.upload_result.show(text.clone());
                self.views.table_data.show(text);
                Vec::new()
            }
        }
    }

    fn spawn(&mut self, flow: Flow, request: ApiRequest) -> Task {
        let generation = self.generations.entry(flow).or_insert(0);
        *generation += 1;
        let id = TaskId {
            flow,
            generation: *generation,
        };
        debug!(%flow, generation = id.generation, target = %request.target, "Task spawned");
        Task { id, request }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawResponse;

    fn reply(status: u16, body: &str) -> Outcome {
        Ok(RawResponse::new(status, body))
    }

    #[test]
    fn test_init_loads_table_list() {
        let mut app = Orchestrator::new();
        let tasks = app.init();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.flow, Flow::Tables);
        assert_eq!(tasks[0].request.target, "/tables");
        assert!(app.display(Region::Tables).is_busy());
    }

    #[test]
    fn test_generations_count_per_flow() {
        let mut app = Orchestrator::new();
        let first = app.refresh_tables().remove(0).id;
        let second = app.refresh_tables().remove(0).id;
        let logs = app.load_logs().remove(0).id;

        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert_eq!(logs.generation, 1);
    }

    #[test]
    fn test_fetch_without_table_name_shows_message() {
        let mut app = Orchestrator::new();
        app.fields.fetch_table = "  ".to_string();
        assert!(app.fetch_data().is_empty());
        assert_eq!(
            app.display(Region::TableData),
            &Display::text("Please enter a table name.")
        );
    }

    #[test]
    fn test_query_without_table_name_changes_nothing() {
        let mut app = Orchestrator::new();
        app.fields.filters = "age>30".to_string();
        assert!(app.submit_query().is_empty());
        assert_eq!(app.display(Region::QueryResult), &Display::Empty);
    }

    #[test]
    fn test_select_table_fills_both_fields_and_fetches() {
        let mut app = Orchestrator::new();
        let tasks = app.select_table("orders");

        assert_eq!(app.fields.fetch_table, "orders");
        assert_eq!(app.fields.query_table, "orders");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].request.target, "/data/orders");
        assert!(app.display(Region::TableData).is_busy());
    }

    #[test]
    fn test_table_list_failure_clears_list() {
        let mut app = Orchestrator::new();
        let id = app.init().remove(0).id;
        app.complete(id, reply(200, r#"{"tables": ["a"]}"#));
        assert_eq!(app.tables(), ["a".to_string()]);
        assert_eq!(app.display(Region::Tables), &Display::Empty);

        let id = app.refresh_tables().remove(0).id;
        app.complete(id, reply(200, "not json"));
        assert!(app.tables().is_empty());
        assert_eq!(
            app.display(Region::Tables),
            &Display::text("Failed to parse server response.")
        );
    }

    #[test]
    fn test_last_response_wins() {
        let mut app = Orchestrator::new();
        app.fields.query_table = "t".to_string();
        let first = app.submit_query().remove(0).id;
        let second = app.submit_query().remove(0).id;

        app.complete(second, reply(200, r#"{"data": [{"v": 2}]}"#));
        app.complete(first, reply(404, r#"{"detail": "gone"}"#));
        assert_eq!(app.display(Region::QueryResult), &Display::text("gone"));
    }

    #[test]
    fn test_completed_slot_is_timestamped() {
        let mut app = Orchestrator::new();
        let id = app.load_logs().remove(0).id;
        assert!(app.slot(Region::Logs).updated_at.is_none());

        app.complete(id, reply(200, r#"{"log": "line"}"#));
        assert!(app.slot(Region::Logs).updated_at.is_some());
    }
}
