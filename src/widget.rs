pub mod choropleth;
