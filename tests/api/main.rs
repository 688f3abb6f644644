mod most_popular;
