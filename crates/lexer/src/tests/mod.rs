// Test module for lexer
//
// Unit tests for the cmpvet lexer, organized by category.
