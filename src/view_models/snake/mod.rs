pub mod snake_view_model;
