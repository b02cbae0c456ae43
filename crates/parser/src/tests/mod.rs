// Test module for parser
//
// Unit tests for the cmpvet parser, organized by category:
// expressions (including spans and ids), statements, printing and errors.

mod display_tests;
mod expr_tests;
