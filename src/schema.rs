table! {
    users (id) {
        id -> Text,
        username -> Text,
        password -> Text,
        email -> Text,
        date_of_birth -> Nullable<Date>,
        date_created -> Timestamp,
    }
}
