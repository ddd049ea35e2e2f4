//! [`SqliteStore`] — the SQLite implementation of [`ItineraryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tratta_core::{
  itinerary::{Itinerary, ItineraryUpdate, NewItinerary},
  store::ItineraryStore,
  user::{NewUser, User},
  validate,
};

use crate::{
  Error, Result,
  encode::{
    RawItinerary, RawUser, encode_amount, encode_dt, encode_gender,
    encode_trip_kind, encode_uuid,
  },
  schema::SCHEMA,
};

const ITINERARY_COLUMNS: &str = "itinerary_id, owner_id, start_address, \
   end_address, trip_kind, leave_date, return_date, fuel_cost, tolls, \
   description, pink, pets_allowed, smoking_allowed, created_at";

fn raw_itinerary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawItinerary> {
  Ok(RawItinerary {
    itinerary_id:    row.get(0)?,
    owner_id:        row.get(1)?,
    start_address:   row.get(2)?,
    end_address:     row.get(3)?,
    trip_kind:       row.get(4)?,
    leave_date:      row.get(5)?,
    return_date:     row.get(6)?,
    fuel_cost:       row.get(7)?,
    tolls:           row.get(8)?,
    description:     row.get(9)?,
    pink:            row.get(10)?,
    pets_allowed:    row.get(11)?,
    smoking_allowed: row.get(12)?,
    created_at:      row.get(13)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tratta itinerary store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built, already-validated [`Itinerary`] row.
  async fn insert_itinerary(&self, itinerary: &Itinerary) -> Result<()> {
    let itinerary_id_str = encode_uuid(itinerary.itinerary_id);
    let owner_id_str     = encode_uuid(itinerary.owner_id);
    let start_address    = itinerary.start_address.clone();
    let end_address      = itinerary.end_address.clone();
    let trip_kind_str    = encode_trip_kind(itinerary.trip_kind).to_owned();
    let leave_date_str   = encode_dt(itinerary.leave_date);
    let return_date_str  = itinerary.return_date.map(encode_dt);
    let fuel_cost_str    = encode_amount(itinerary.fuel_cost);
    let tolls_str        = encode_amount(itinerary.tolls);
    let description      = itinerary.description.clone();
    let pink             = itinerary.pink;
    let pets_allowed     = itinerary.pets_allowed;
    let smoking_allowed  = itinerary.smoking_allowed;
    let created_at_str   = encode_dt(itinerary.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO itineraries (
             itinerary_id, owner_id, start_address, end_address, trip_kind,
             leave_date, return_date, fuel_cost, tolls, description,
             pink, pets_allowed, smoking_allowed, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
          rusqlite::params![
            itinerary_id_str,
            owner_id_str,
            start_address,
            end_address,
            trip_kind_str,
            leave_date_str,
            return_date_str,
            fuel_cost_str,
            tolls_str,
            description,
            pink,
            pets_allowed,
            smoking_allowed,
            created_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ItineraryStore impl ─────────────────────────────────────────────────────

impl ItineraryStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:    Uuid::new_v4(),
      name:       input.name,
      gender:     input.gender,
      created_at: Utc::now(),
    };

    let id_str     = encode_uuid(user.user_id);
    let name       = user.name.clone();
    let gender_str = encode_gender(user.gender).to_owned();
    let at_str     = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, name, gender, created_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, gender_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, name, gender, created_at FROM users WHERE user_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawUser {
                user_id:    row.get(0)?,
                name:       row.get(1)?,
                gender:     row.get(2)?,
                created_at: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  // ── Itineraries ───────────────────────────────────────────────────────────

  async fn create_itinerary(&self, input: NewItinerary) -> Result<Itinerary> {
    input.validate()?;
    let input = input.normalized();

    if self.get_user(input.owner_id).await?.is_none() {
      return Err(Error::UserNotFound(input.owner_id));
    }

    let itinerary = Itinerary {
      itinerary_id:    Uuid::new_v4(),
      owner_id:        input.owner_id,
      start_address:   input.start_address,
      end_address:     input.end_address,
      trip_kind:       input.trip_kind,
      leave_date:      input.leave_date,
      return_date:     input.return_date,
      fuel_cost:       input.fuel_cost,
      tolls:           input.tolls,
      description:     input.description,
      pink:            input.pink,
      pets_allowed:    input.pets_allowed,
      smoking_allowed: input.smoking_allowed,
      created_at:      Utc::now(),
    };

    self.insert_itinerary(&itinerary).await?;
    Ok(itinerary)
  }

  async fn get_itinerary(&self, id: Uuid) -> Result<Option<Itinerary>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawItinerary> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {ITINERARY_COLUMNS} FROM itineraries WHERE itinerary_id = ?1"
            ),
            rusqlite::params![id_str],
            raw_itinerary_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawItinerary::into_itinerary).transpose()
  }

  async fn list_all(&self) -> Result<Vec<Itinerary>> {
    let raws: Vec<RawItinerary> = self
      .conn
      .call(|conn| {
        // rowid preserves true insertion order even when created_at ties.
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITINERARY_COLUMNS} FROM itineraries ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], raw_itinerary_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItinerary::into_itinerary).collect()
  }

  async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Itinerary>> {
    let owner_id_str = encode_uuid(owner_id);

    let raws: Vec<RawItinerary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITINERARY_COLUMNS} FROM itineraries
           WHERE owner_id = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_id_str], raw_itinerary_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItinerary::into_itinerary).collect()
  }

  async fn update_itinerary(
    &self,
    id: Uuid,
    changes: ItineraryUpdate,
  ) -> Result<Itinerary> {
    let existing = self
      .get_itinerary(id)
      .await?
      .ok_or(Error::ItineraryNotFound(id))?;

    let merged = changes.apply(existing);

    validate::validate_addresses(&merged.start_address, &merged.end_address)?;
    validate::validate_schedule(
      merged.trip_kind,
      merged.leave_date,
      merged.return_date,
    )?;
    validate::validate_amounts(merged.fuel_cost, merged.tolls)?;

    let id_str          = encode_uuid(id);
    let start_address   = merged.start_address.clone();
    let end_address     = merged.end_address.clone();
    let trip_kind_str   = encode_trip_kind(merged.trip_kind).to_owned();
    let leave_date_str  = encode_dt(merged.leave_date);
    let return_date_str = merged.return_date.map(encode_dt);
    let fuel_cost_str   = encode_amount(merged.fuel_cost);
    let tolls_str       = encode_amount(merged.tolls);
    let description     = merged.description.clone();
    let pink            = merged.pink;
    let pets_allowed    = merged.pets_allowed;
    let smoking_allowed = merged.smoking_allowed;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE itineraries SET
             start_address = ?2, end_address = ?3, trip_kind = ?4,
             leave_date = ?5, return_date = ?6, fuel_cost = ?7, tolls = ?8,
             description = ?9, pink = ?10, pets_allowed = ?11,
             smoking_allowed = ?12
           WHERE itinerary_id = ?1",
          rusqlite::params![
            id_str,
            start_address,
            end_address,
            trip_kind_str,
            leave_date_str,
            return_date_str,
            fuel_cost_str,
            tolls_str,
            description,
            pink,
            pets_allowed,
            smoking_allowed,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(merged)
  }

  async fn delete_itinerary(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM itineraries WHERE itinerary_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::ItineraryNotFound(id));
    }
    Ok(())
  }
}
