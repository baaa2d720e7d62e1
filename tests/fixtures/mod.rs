pub mod sample_diagrams;
