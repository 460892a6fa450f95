pub mod review_form;
pub mod reviews_list;
pub mod reviews_section;
pub mod star_rating;
