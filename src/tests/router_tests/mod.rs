mod notifications_tests;
mod pages_tests;
