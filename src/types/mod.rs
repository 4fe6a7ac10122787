pub mod location_query;
pub mod location_record;
pub mod raw_response;
pub mod variable;
