pub mod dto;
pub mod grade_calc;
pub mod gradebook_service;
pub mod reducer;
