mod ratelimit;
mod text_manipulators;
mod url_invalid_error;

pub mod classifier;
pub mod colour;
pub mod config;
pub mod listings_scraper;
pub mod reference_table;
pub mod requests;
pub mod scraping_context;
pub mod sheets_auth;
pub mod sheets_client;
pub mod timetable_reader;

pub use classifier::{ClassifyError, ColourClassifier, InvalidTolerance, Tolerance, classify};
pub use colour::{Colour, InvalidColour, ScreenNumber, ShiftCategory};
pub use listings_scraper::{ListingsScraper, extract_movie_ids};
pub use reference_table::{ReferenceTable, ReferenceTableError};
pub use scraping_context::ScrapingContext;
pub use sheets_client::{SheetCell, SheetsClient, extract_spreadsheet_id};
pub use timetable_reader::{ClassifiedCell, ClassifiedSheet, TimetableReader};
pub use url_invalid_error::UrlInvalidError;
