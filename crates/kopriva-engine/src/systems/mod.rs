pub mod hit_router;
pub mod placement;
