pub const SELECT_LIVE_VEHICLE: &str = r#"
SELECT id, user_id, title, image, plate_number, brand, model, price::float8 AS price,
       year, status, created_at, updated_at, deleted_at
FROM vehicles
WHERE id = $1 AND deleted_at IS NULL;
"#;

pub const SELECT_LIVE_VEHICLES: &str = r#"
SELECT id, user_id, title, image, plate_number, brand, model, price::float8 AS price,
       year, status, created_at, updated_at, deleted_at
FROM vehicles
WHERE deleted_at IS NULL
ORDER BY id;
"#;

pub const SELECT_LIVE_VEHICLES_FOR_OWNER: &str = r#"
SELECT id, user_id, title, image, plate_number, brand, model, price::float8 AS price,
       year, status, created_at, updated_at, deleted_at
FROM vehicles
WHERE user_id = $1 AND deleted_at IS NULL
ORDER BY id;
"#;

pub const SELECT_VEHICLE_LOCATIONS: &str = r#"
SELECT id, vehicle_id, latitude, longitude, timestamp, correlation_id, created_at
FROM gps_locations
WHERE vehicle_id = $1
ORDER BY timestamp ASC, id ASC;
"#;

pub const SELECT_FLEET_LOCATIONS: &str = r#"
SELECT id, vehicle_id, latitude, longitude, timestamp, correlation_id, created_at
FROM gps_locations
WHERE vehicle_id = ANY($1)
ORDER BY vehicle_id ASC, timestamp ASC, id ASC;
"#;

pub const INSERT_GPS_LOCATION: &str = r#"
INSERT INTO gps_locations (vehicle_id, latitude, longitude, timestamp, correlation_id)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (correlation_id) DO NOTHING
RETURNING id, vehicle_id, latitude, longitude, timestamp, correlation_id, created_at;
"#;
