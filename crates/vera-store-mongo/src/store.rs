//! [`MongoStore`] — the durable implementation of [`RegistroStore`].

use std::time::Duration;

use bson::{Document, doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt as _;
use mongodb::{
  Client, Collection,
  options::{ClientOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use vera_core::{
  registro::Registro,
  store::{Page, Pagination, RegistroFilters, RegistroPatch, RegistroStore},
};

use crate::{
  Error, Result,
  query::{build_filter, clamp_limit, sort_spec},
};

/// Name of the backing collection.
const COLLECTION: &str = "registros";

/// How long the driver waits for a reachable server before an operation
/// fails instead of hanging.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Document mapping ────────────────────────────────────────────────────────

/// Wire form of a registro in the collection.
///
/// `_id` is left for the driver to assign on insert, which normalises the
/// service-assigned id away. `calculatedAdmissionDate` is persisted only as
/// a cache; read paths recompute it upstream.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistroDocument {
  #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
  id:                        Option<ObjectId>,
  admission_date:            String,
  salary:                    f64,
  calculated_salary:         f64,
  employee:                  String,
  #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
  created_at:                DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  calculated_admission_date: Option<String>,
}

impl RegistroDocument {
  fn from_registro(registro: &Registro) -> Self {
    Self {
      id:                        None,
      admission_date:            registro.admission_date.clone(),
      salary:                    registro.salary,
      calculated_salary:         registro.calculated_salary,
      employee:                  registro.employee.clone(),
      created_at:                registro.created_at,
      calculated_admission_date: registro.calculated_admission_date.clone(),
    }
  }

  fn into_registro(self) -> Registro {
    Registro {
      id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
      admission_date: self.admission_date,
      salary: self.salary,
      calculated_salary: self.calculated_salary,
      employee: self.employee,
      created_at: self.created_at,
      calculated_admission_date: self.calculated_admission_date,
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A registro store backed by a remote MongoDB collection.
///
/// Cloning is cheap — the driver's handles are reference-counted.
#[derive(Clone)]
pub struct MongoStore {
  collection: Collection<RegistroDocument>,
}

impl MongoStore {
  /// Connect to `uri` and bind the `registros` collection in `database`.
  ///
  /// The server-selection timeout bounds every subsequent operation: an
  /// unreachable store surfaces as an [`Error`], it does not hang.
  pub async fn connect(uri: &str, database: &str) -> Result<Self> {
    let mut options =
      ClientOptions::parse(uri).await.map_err(Error::Connect)?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

    let client = Client::with_options(options).map_err(Error::Connect)?;
    Ok(Self {
      collection: client.database(database).collection(COLLECTION),
    })
  }
}

// ─── RegistroStore impl ──────────────────────────────────────────────────────

impl RegistroStore for MongoStore {
  type Error = Error;

  async fn insert(&self, registro: Registro) -> Result<Registro> {
    let document = RegistroDocument::from_registro(&registro);
    let inserted = self
      .collection
      .insert_one(&document)
      .await
      .map_err(Error::Insert)?;

    let oid = inserted
      .inserted_id
      .as_object_id()
      .ok_or(Error::MalformedInsertedId)?;
    Ok(Registro {
      id: oid.to_hex(),
      ..registro
    })
  }

  async fn get(&self, filters: &RegistroFilters) -> Result<Vec<Registro>> {
    let documents: Vec<RegistroDocument> = self
      .collection
      .find(build_filter(filters))
      .await
      .map_err(Error::Fetch)?
      .try_collect()
      .await
      .map_err(Error::Fetch)?;

    Ok(
      documents
        .into_iter()
        .map(RegistroDocument::into_registro)
        .collect(),
    )
  }

  async fn get_paginated(
    &self,
    filters: &RegistroFilters,
    pagination: &Pagination,
  ) -> Result<Page<Registro>> {
    let filter = build_filter(filters);
    let limit = clamp_limit(pagination.limit);
    // `page` is unsigned, so its >= 0 clamp is structural.
    let skip = pagination.page.saturating_mul(limit);

    let total = self
      .collection
      .count_documents(filter.clone())
      .await
      .map_err(Error::FetchPaginated)?;

    let documents: Vec<RegistroDocument> = self
      .collection
      .find(filter)
      .sort(sort_spec(pagination))
      .skip(skip)
      .limit(limit as i64)
      .await
      .map_err(Error::FetchPaginated)?
      .try_collect()
      .await
      .map_err(Error::FetchPaginated)?;

    Ok(Page {
      total,
      page: pagination.page,
      total_pages: total.div_ceil(limit),
      limit,
      data: documents
        .into_iter()
        .map(RegistroDocument::into_registro)
        .collect(),
    })
  }

  async fn get_by_id(&self, id: &str) -> Result<Option<Registro>> {
    // A malformed id can never match a real record: absence, not an error.
    let Ok(oid) = ObjectId::parse_str(id) else {
      return Ok(None);
    };

    let document = self
      .collection
      .find_one(doc! { "_id": oid })
      .await
      .map_err(|source| Error::FetchById {
        id: id.to_string(),
        source,
      })?;
    Ok(document.map(RegistroDocument::into_registro))
  }

  async fn put(
    &self,
    id: &str,
    patch: RegistroPatch,
  ) -> Result<Option<Registro>> {
    let Ok(oid) = ObjectId::parse_str(id) else {
      return Ok(None);
    };

    let mut fields = Document::new();
    if let Some(admission_date) = patch.admission_date {
      fields.insert("admissionDate", admission_date);
    }
    if let Some(salary) = patch.salary {
      fields.insert("salary", salary);
    }
    if let Some(calculated_salary) = patch.calculated_salary {
      fields.insert("calculatedSalary", calculated_salary);
    }
    if let Some(employee) = patch.employee {
      fields.insert("employee", employee);
    }
    if let Some(label) = patch.calculated_admission_date {
      fields.insert("calculatedAdmissionDate", label);
    }

    if fields.is_empty() {
      // Nothing to merge; report the current state.
      return self.get_by_id(id).await;
    }

    let document = self
      .collection
      .find_one_and_update(doc! { "_id": oid }, doc! { "$set": fields })
      .return_document(ReturnDocument::After)
      .await
      .map_err(|source| Error::Update {
        id: id.to_string(),
        source,
      })?;
    Ok(document.map(RegistroDocument::into_registro))
  }

  async fn delete(&self, id: &str) -> Result<bool> {
    let Ok(oid) = ObjectId::parse_str(id) else {
      return Ok(false);
    };

    let result = self
      .collection
      .delete_one(doc! { "_id": oid })
      .await
      .map_err(|source| Error::Delete {
        id: id.to_string(),
        source,
      })?;
    Ok(result.deleted_count > 0)
  }
}
