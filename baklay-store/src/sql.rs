//! SQL text for every repository. Values are always bound with `?`; sqlx keeps
//! a prepared statement per distinct text on each connection.

macro_rules! booking_view {
    ($tail:literal) => {
        concat!(
            "SELECT b.id, b.customer_id, c.name AS customer_name, b.schedule_id, ",
            "t.description AS trek_description, s.schedule_date, s.guide_id, g.name AS guide_name, ",
            "b.guest_count, b.total_centavos, b.status ",
            "FROM bookings b ",
            "JOIN users c ON c.id = b.customer_id ",
            "JOIN schedules s ON s.id = b.schedule_id ",
            "JOIN treks t ON t.id = s.trek_id ",
            "LEFT JOIN users g ON g.id = s.guide_id ",
            $tail
        )
    };
}

macro_rules! schedule_view {
    ($tail:literal) => {
        concat!(
            "SELECT s.id, s.trek_id, t.code AS trek_code, t.description AS trek_description, ",
            "t.price_centavos, s.schedule_date, s.capacity, s.guide_id, g.name AS guide_name ",
            "FROM schedules s ",
            "JOIN treks t ON t.id = s.trek_id ",
            "LEFT JOIN users g ON g.id = s.guide_id ",
            $tail
        )
    };
}

// Users

pub const USER_CREDENTIALS_BY_EMAIL: &str =
    "SELECT id, name, email, contact, user_type, status, password_hash FROM users WHERE email = ?";
pub const USER_EMAIL_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)";
pub const INSERT_USER: &str = "INSERT INTO users (name, email, contact, user_type, status, password_hash, created_at) VALUES (?, ?, ?, ?, 'Pending', ?, ?)";
pub const LIST_USERS: &str =
    "SELECT id, name, email, contact, user_type, status FROM users ORDER BY id";
pub const APPROVE_USER: &str = "UPDATE users SET status = 'Approved' WHERE id = ?";
pub const LIST_APPROVED_GUIDES: &str = "SELECT id, name, email, contact, user_type, status FROM users WHERE user_type = 'Guide' AND status = 'Approved' ORDER BY id";
pub const APPROVED_GUIDE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE id = ? AND user_type = 'Guide' AND status = 'Approved')";

// Treks

pub const INSERT_TREK: &str =
    "INSERT INTO treks (code, description, difficulty, price_centavos) VALUES (?, ?, ?, ?)";
pub const LIST_TREKS: &str =
    "SELECT id, code, description, difficulty, price_centavos FROM treks ORDER BY id";
pub const TREK_BY_ID: &str =
    "SELECT id, code, description, difficulty, price_centavos FROM treks WHERE id = ?";
pub const UPDATE_TREK_DESCRIPTION: &str = "UPDATE treks SET description = ? WHERE id = ?";
pub const DELETE_TREK: &str = "DELETE FROM treks WHERE id = ?";

// Schedules

pub const INSERT_SCHEDULE: &str =
    "INSERT INTO schedules (trek_id, schedule_date, capacity, guide_id) VALUES (?, ?, ?, ?)";
pub const LIST_SCHEDULES: &str = schedule_view!("ORDER BY s.schedule_date, s.id");
pub const LIST_AVAILABLE_SCHEDULES: &str = schedule_view!(
    "WHERE s.capacity > 0 AND s.schedule_date >= ? ORDER BY s.schedule_date, s.id"
);
pub const SCHEDULE_BY_ID: &str = schedule_view!("WHERE s.id = ?");
pub const SCHEDULE_FOR_BOOKING: &str = "SELECT s.capacity, t.price_centavos, s.schedule_date FROM schedules s JOIN treks t ON t.id = s.trek_id WHERE s.id = ?";
/// Guarded decrement: touches no row unless enough slots remain.
pub const TAKE_CAPACITY: &str =
    "UPDATE schedules SET capacity = capacity - ? WHERE id = ? AND capacity >= ?";
pub const RETURN_CAPACITY: &str = "UPDATE schedules SET capacity = capacity + ? WHERE id = ?";
pub const ASSIGN_GUIDE: &str =
    "UPDATE schedules SET guide_id = ? WHERE id = ? AND guide_id IS NULL";

// Bookings

pub const INSERT_BOOKING: &str = "INSERT INTO bookings (customer_id, schedule_id, guest_count, total_centavos, status, created_at) VALUES (?, ?, ?, ?, 'Pending', ?)";
pub const INSERT_GUEST: &str = "INSERT INTO guests (booking_id, name) VALUES (?, ?)";
pub const BOOKING_BY_ID: &str = "SELECT id, customer_id, schedule_id, guest_count, total_centavos, status, created_at FROM bookings WHERE id = ?";
pub const BOOKING_BY_ID_FOR_CUSTOMER: &str = "SELECT id, customer_id, schedule_id, guest_count, total_centavos, status, created_at FROM bookings WHERE id = ? AND customer_id = ?";
pub const BOOKING_BY_ID_FOR_GUIDE: &str = "SELECT b.id, b.customer_id, b.schedule_id, b.guest_count, b.total_centavos, b.status, b.created_at FROM bookings b JOIN schedules s ON s.id = b.schedule_id WHERE b.id = ? AND s.guide_id = ?";
pub const SET_BOOKING_STATUS: &str = "UPDATE bookings SET status = ? WHERE id = ?";
pub const LIST_BOOKINGS: &str = booking_view!("ORDER BY b.id");
pub const LIST_CUSTOMER_BOOKINGS: &str = booking_view!("WHERE b.customer_id = ? ORDER BY b.id");
pub const BOOKING_VIEW_BY_ID: &str = booking_view!("WHERE b.id = ?");
pub const LIST_ASSIGNED_BOOKINGS: &str = booking_view!(
    "WHERE s.guide_id = ? AND b.status IN ('Approved', 'Confirmed') ORDER BY s.schedule_date, b.id"
);
pub const ASSIGNED_BOOKING_VIEW: &str = booking_view!("WHERE b.id = ? AND s.guide_id = ?");
pub const MANIFEST_HEADER: &str = "SELECT b.id, t.description AS trek_description, c.name AS lead_name, c.contact AS lead_contact, b.guest_count \
     FROM bookings b \
     JOIN users c ON c.id = b.customer_id \
     JOIN schedules s ON s.id = b.schedule_id \
     JOIN treks t ON t.id = s.trek_id \
     WHERE b.id = ? AND s.guide_id = ? AND b.status IN ('Approved', 'Confirmed')";
pub const GUEST_NAMES: &str = "SELECT name FROM guests WHERE booking_id = ? ORDER BY id";
