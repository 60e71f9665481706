mod pyramid;
