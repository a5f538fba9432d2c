mod test_mask_expr;
mod test_surface_asc;
