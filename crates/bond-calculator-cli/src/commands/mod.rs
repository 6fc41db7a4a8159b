pub mod bond;
